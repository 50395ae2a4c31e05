use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,

    // Address enrichment
    pub viacep_base_url: String,
    pub lookup_pause_ms: u64,

    // Bulk import
    pub import_file: String,
    pub csv_delimiter: u8,
    pub default_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://rh_admin.db".to_string()),

            viacep_base_url: env::var("VIACEP_BASE_URL")
                .unwrap_or_else(|_| "https://viacep.com.br".to_string()),
            lookup_pause_ms: env::var("LOOKUP_PAUSE_MS")
                .unwrap_or_else(|_| "300".to_string()) // keep ViaCEP happy
                .parse()
                .unwrap(),

            import_file: env::var("IMPORT_FILE").unwrap_or_else(|_| "importacao.csv".to_string()),
            csv_delimiter: single_byte_delimiter(
                &env::var("CSV_DELIMITER").unwrap_or_else(|_| ";".to_string()), // BR spreadsheet default
            ),
            default_password: env::var("DEFAULT_PASSWORD").unwrap_or_else(|_| "123".to_string()),
        }
    }
}

fn single_byte_delimiter(raw: &str) -> u8 {
    match raw.as_bytes() {
        [b] => *b,
        _ => panic!("CSV_DELIMITER must be exactly one byte, got {raw:?}"),
    }
}
