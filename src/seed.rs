use crate::models::{ListingType, NewProperty, Property};
use chrono::{Duration, TimeZone, Utc};

fn avatar(name: &str, background: &str) -> Option<String> {
    Some(format!(
        "https://ui-avatars.com/api/?name={}&background={}&color=fff&size=200",
        name.replace(' ', "+"),
        background
    ))
}

fn photo(id: &str) -> Option<String> {
    Some(format!(
        "https://images.unsplash.com/{id}?q=80&w=1600&auto=format&fit=crop"
    ))
}

fn amenities(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Sample catalog used by the `seed` command and the memory backend
pub fn sample_listings() -> Vec<NewProperty> {
    vec![
        NewProperty {
            title: "Villa de Lujo en Punta Cana".to_string(),
            description: Some("Impresionante villa frente al mar con acabados de primer nivel. Cocina gourmet, piscina privada con vista al mar y acceso directo a la playa.".to_string()),
            price: 850_000.0,
            price_label: "$850,000".to_string(),
            listing_type: ListingType::Sale,
            location: "Punta Cana, La Altagracia".to_string(),
            beds: 5,
            baths: 6.0,
            area: Some("650 m²".to_string()),
            image_url: photo("photo-1613490493576-7fde63acd811"),
            featured: true,
            agent_name: Some("María Rosario".to_string()),
            agent_phone: Some("+18095550101".to_string()),
            agent_email: Some("maria@inmobiliariarosire.com".to_string()),
            agent_photo_url: avatar("Maria Rosario", "1e3a5f"),
            amenities: amenities(&["Piscina privada", "Acceso a la playa", "Cocina gourmet", "Terraza panorámica", "Seguridad 24/7", "Estacionamiento x3"]),
        },
        NewProperty {
            title: "Apartamento Moderno en Piantini".to_string(),
            description: Some("Elegante apartamento en el corazón financiero de Santo Domingo con balcón y vistas al skyline.".to_string()),
            price: 285_000.0,
            price_label: "$285,000".to_string(),
            listing_type: ListingType::Sale,
            location: "Piantini, Santo Domingo".to_string(),
            beds: 3,
            baths: 3.5,
            area: Some("185 m²".to_string()),
            image_url: photo("photo-1545324418-cc1a3fa10c00"),
            featured: false,
            agent_name: Some("Carlos Méndez".to_string()),
            agent_phone: Some("+18095550202".to_string()),
            agent_email: Some("carlos@inmobiliariarosire.com".to_string()),
            agent_photo_url: avatar("Carlos Mendez", "2563eb"),
            amenities: amenities(&["Piscina en azotea", "Gimnasio", "Lobby de lujo", "Generador eléctrico", "Estacionamiento x2"]),
        },
        NewProperty {
            title: "Penthouse Exclusivo en Bella Vista".to_string(),
            description: Some("Espectacular penthouse de doble altura con vistas de 360° de Santo Domingo. Terraza privada y jacuzzi exterior.".to_string()),
            price: 3_500.0,
            price_label: "$3,500/mes".to_string(),
            listing_type: ListingType::Rental,
            location: "Bella Vista, Santo Domingo".to_string(),
            beds: 4,
            baths: 4.0,
            area: Some("320 m²".to_string()),
            image_url: photo("photo-1512917774080-9991f1c4c750"),
            featured: false,
            agent_name: Some("Ana Jiménez".to_string()),
            agent_phone: Some("+18095550303".to_string()),
            agent_email: Some("ana@inmobiliariarosire.com".to_string()),
            agent_photo_url: avatar("Ana Jimenez", "7c3aed"),
            amenities: amenities(&["Terraza privada con jacuzzi", "Vista panorámica", "Doble altura", "Walk-in closet"]),
        },
        NewProperty {
            title: "Casa Familiar en Los Prados".to_string(),
            description: Some("Amplia casa familiar en urbanización cerrada con parque. Perfecta para criar una familia en entorno seguro.".to_string()),
            price: 195_000.0,
            price_label: "$195,000".to_string(),
            listing_type: ListingType::Sale,
            location: "Los Prados, Santo Domingo".to_string(),
            beds: 4,
            baths: 3.0,
            area: Some("280 m²".to_string()),
            image_url: photo("photo-1568605114967-8130f3a36994"),
            featured: false,
            agent_name: Some("María Rosario".to_string()),
            agent_phone: Some("+18095550101".to_string()),
            agent_email: Some("maria@inmobiliariarosire.com".to_string()),
            agent_photo_url: avatar("Maria Rosario", "1e3a5f"),
            amenities: amenities(&["Urbanización cerrada", "Patio trasero", "Garaje 2 carros", "Área de juegos"]),
        },
        NewProperty {
            title: "Apartamento en La Romana".to_string(),
            description: Some("Moderno apartamento cerca de Casa de Campo. Ideal para ejecutivos con acceso a golf y playas.".to_string()),
            price: 1_800.0,
            price_label: "$1,800/mes".to_string(),
            listing_type: ListingType::Rental,
            location: "La Romana, La Romana".to_string(),
            beds: 2,
            baths: 2.0,
            area: Some("110 m²".to_string()),
            image_url: photo("photo-1493809842364-78817add7ffb"),
            featured: false,
            agent_name: Some("Carlos Méndez".to_string()),
            agent_phone: Some("+18095550202".to_string()),
            agent_email: Some("carlos@inmobiliariarosire.com".to_string()),
            agent_photo_url: avatar("Carlos Mendez", "2563eb"),
            amenities: amenities(&["Cerca de Casa de Campo", "Piscina comunitaria", "Internet de alta velocidad"]),
        },
        NewProperty {
            title: "Terreno Frente al Mar en Sosúa".to_string(),
            description: Some("Terreno plano con frente a la costa norte. Excelente oportunidad de inversión en zona turística de alto crecimiento.".to_string()),
            price: 420_000.0,
            price_label: "$420,000".to_string(),
            listing_type: ListingType::Sale,
            location: "Sosúa, Puerto Plata".to_string(),
            beds: 0,
            baths: 0.0,
            area: Some("1,200 m²".to_string()),
            image_url: photo("photo-1500382017468-9049fed747ef"),
            featured: true,
            agent_name: Some("Ana Jiménez".to_string()),
            agent_phone: Some("+18095550303".to_string()),
            agent_email: Some("ana@inmobiliariarosire.com".to_string()),
            agent_photo_url: avatar("Ana Jimenez", "7c3aed"),
            amenities: amenities(&["Frente al mar", "Acceso a carretera", "Zona turística", "Servicios básicos"]),
        },
    ]
}

/// Sample listings with stable ids, each one created a day after the previous
pub fn sample_properties() -> Vec<Property> {
    let base = Utc
        .with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    sample_listings()
        .into_iter()
        .enumerate()
        .map(|(i, listing)| {
            let id = format!("00000000-0000-4000-8000-{:012}", i + 1);
            Property::from_new(listing, id, base + Duration::days(i as i64))
        })
        .collect()
}
