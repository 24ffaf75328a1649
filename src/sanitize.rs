/// Used when neither the extracted name nor the page title yield anything.
pub const NAME_PLACEHOLDER: &str = "Producto";

const BOILERPLATE: &[&str] = &[
    "| MercadoLibre",
    "- MercadoLibre",
    "| Amazon",
    "- Amazon",
    "| Liverpool",
    "- Liverpool",
    "| Walmart",
    "- Walmart",
    "✓ Compra online de manera segura con Compra Protegida ©",
    "❤",
    "✓",
    "©",
];

/// Strip store boilerplate from `name`, falling back to the leading segment
/// of the page title and finally to [`NAME_PLACEHOLDER`]. Never empty.
pub fn sanitize_name(name: &str, page_title: &str) -> String {
    let cleaned = BOILERPLATE
        .iter()
        .fold(name.to_string(), |acc, noise| acc.replace(noise, ""));
    let cleaned = cleaned.trim();
    if !cleaned.is_empty() {
        return cleaned.to_string();
    }

    let from_title = title_prefix(page_title);
    if !from_title.is_empty() {
        return from_title.to_string();
    }

    NAME_PLACEHOLDER.to_string()
}

fn title_prefix(title: &str) -> &str {
    let before_bar = title.split('|').next().unwrap_or_default();
    before_bar.split('-').next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Audífonos Inalámbricos | MercadoLibre", "Audífonos Inalámbricos")]
    #[case("Kindle Paperwhite - Amazon", "Kindle Paperwhite")]
    #[case("❤ Pantalla 55\" ✓", "Pantalla 55\"")]
    #[case(
        "Bicicleta R29 ✓ Compra online de manera segura con Compra Protegida ©",
        "Bicicleta R29"
    )]
    fn test_boilerplate_removed(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(sanitize_name(name, "ignorado"), expected);
    }

    #[test]
    fn test_falls_back_to_title_prefix() {
        assert_eq!(
            sanitize_name("| Liverpool", "Refrigerador LG - Hogar | Liverpool"),
            "Refrigerador LG"
        );
    }

    #[test]
    fn test_placeholder_when_nothing_left() {
        assert_eq!(sanitize_name("", ""), NAME_PLACEHOLDER);
        assert_eq!(sanitize_name("©", " | Tienda"), NAME_PLACEHOLDER);
    }

    #[test]
    fn test_hyphenated_names_are_kept() {
        assert_eq!(sanitize_name("Wi-Fi Router AX3000", ""), "Wi-Fi Router AX3000");
    }
}
