//! Wedding expense categories
//!
//! The 14 categories are shared by budget items, vendors and the initial
//! budget, and are the only join key between them.

use super::choice::fixed_choice;

fixed_choice! {
    /// One of the fixed wedding-expense classifications
    pub enum Category ("kategori") {
        ChurchBlessing => "Pemberkatan Gereja",
        Venue => "Gedung & Venue",
        Catering => "Katering",
        Decoration => "Dekorasi",
        TraditionalAttire => "Pakaian Adat & Pengantin",
        InvitationsSouvenirs => "Undangan & Souvenir",
        Entertainment => "Hiburan (Musik/MC)",
        Documentation => "Dokumentasi (Foto/Video)",
        RingsDowry => "Cincin & Mahar",
        Transportation => "Transportasi",
        MakeupWardrobe => "Perias & Busana",
        GuestLodging => "Akomodasi Tamu",
        CustomaryExtras => "Biaya Adat Tambahan",
        Contingency => "Biaya Tak Terduga",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_fourteen_categories_in_order() {
        assert_eq!(Category::ALL.len(), 14);
        assert_eq!(Category::first(), Category::ChurchBlessing);
        assert_eq!(Category::ALL[13], Category::Contingency);
        assert!(Category::ChurchBlessing < Category::Contingency);
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(Category::from_str("Katering").unwrap(), Category::Catering);
        assert_eq!(
            Category::from_str(" hiburan (musik/mc) ").unwrap(),
            Category::Entertainment
        );
    }

    #[test]
    fn test_parse_unknown_label() {
        let err = Category::from_str("Bulan Madu").unwrap_err();
        assert_eq!(err.field, "kategori");
        assert_eq!(err.to_string(), "Nilai kategori tidak valid: Bulan Madu");
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Category::Venue).unwrap();
        assert_eq!(json, "\"Gedung & Venue\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Venue);
    }
}
