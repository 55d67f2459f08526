table! {
    schema_version (id) {
        id -> Integer,
        version -> Integer,
    }
}

table! {
    stations (id) {
        id -> BigInt,
        stationuuid -> Nullable<Text>,
        name -> Text,
        url -> Text,
        homepage -> Nullable<Text>,
        favicon -> Nullable<Text>,
        tags -> Nullable<Text>,
        countrycode -> Nullable<Text>,
    }
}

table! {
    collections (id) {
        id -> BigInt,
        name -> Text,
        icon -> Nullable<Text>,
        sort_key -> Double,
    }
}

table! {
    memberships (station_id, collection_id) {
        station_id -> BigInt,
        collection_id -> BigInt,
        sort_key -> Double,
    }
}

table! {
    change_log (id) {
        id -> BigInt,
        action -> Text,
        table_name -> Text,
        row_id -> BigInt,
    }
}

joinable!(memberships -> stations (station_id));
joinable!(memberships -> collections (collection_id));

allow_tables_to_appear_in_same_query!(stations, collections, memberships);
