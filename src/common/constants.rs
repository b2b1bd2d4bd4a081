/// Feed and artifact constants shared across the pipeline.
/// Defaults in `config` are built from these.

// La Rochelle open-data agenda export
pub const DEFAULT_FEED_URL: &str =
    "https://opendata.larochelle.fr/dataset/evenementiel-agenda-des-evenements/?download=1661";

pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const EVENTS_V1_FILE: &str = "events.json";
pub const EVENTS_V2_FILE: &str = "events-v2.json";

/// Events lasting strictly more than this many days are listed as "long".
pub const LONG_EVENT_THRESHOLD_DAYS: i64 = 4;

/// Top-level key holding the build time in both documents.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Source field -> output field, in emission order.
pub const OPTIONAL_FIELD_RULES: &[(&str, &str)] = &[
    ("lieu", "location"),
    ("categorie", "categories"),
    ("description", "description"),
    ("complement", "more"),
];

// Required source fields
pub const FIELD_ID: &str = "id";
pub const FIELD_TITLE: &str = "titre";
pub const FIELD_DATE_START: &str = "date_debut";
pub const FIELD_DATE_END: &str = "date_fin";

