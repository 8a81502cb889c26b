table! {
    #[sql_name = "Shelter"]
    shelters (id) {
        id -> Int4,
        district -> Text,
        address -> Text,
        shelter_type -> Nullable<Text>,
        place -> Nullable<Text>,
        building_type -> Nullable<Text>,
        owner -> Nullable<Text>,
        ownership -> Nullable<Text>,
        phone -> Nullable<Text>,
        accessibility -> Bool,
        hours -> Nullable<Text>,
        latitude -> Float8,
        longitude -> Float8,
    }
}
