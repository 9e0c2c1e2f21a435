use crate::models::Property;

/// Inventory summary sent as `systemContext` so the assistant answers
/// from the live catalog
pub fn catalog_context(properties: &[Property]) -> String {
    if properties.is_empty() {
        return "Catálogo actual: no hay propiedades disponibles.".to_string();
    }

    let mut out = format!("Catálogo actual ({} propiedades):\n", properties.len());
    for p in properties {
        out.push_str(&format!(
            "- {} | {} | {} | {} | {} hab, {} baños",
            p.title, p.location, p.listing_type, p.price_label, p.beds, p.baths
        ));
        if let Some(area) = &p.area {
            out.push_str(&format!(" | {area}"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_properties;

    #[test]
    fn test_one_line_per_listing() {
        let properties = sample_properties();
        let context = catalog_context(&properties);
        assert_eq!(context.lines().count(), properties.len() + 1);
        assert!(context.contains("- Apartamento Moderno en Piantini | Piantini, Santo Domingo | Venta | $285,000 | 3 hab, 3.5 baños | 185 m²"));
    }

    #[test]
    fn test_empty_catalog() {
        assert!(catalog_context(&[]).contains("no hay propiedades"));
    }
}
