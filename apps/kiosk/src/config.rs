use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub directory_url: String,
    pub confirm_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory_url:
                "https://x8ki-letl-twmt.n7.xano.io/api:ILNGnLID/casamento/get/convidados".into(),
            confirm_url: "https://x8ki-letl-twmt.n7.xano.io/api:ILNGnLID/casamento/confirm".into(),
        }
    }
}

/// Defaults, overridden by `rsvp.toml`, overridden by environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("rsvp.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("RSVP_DIRECTORY_URL") {
        settings.directory_url = v;
    }
    if let Ok(v) = std::env::var("RSVP_CONFIRM_URL") {
        settings.confirm_url = v;
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("directory_url") {
            settings.directory_url = v.clone();
        }
        if let Some(v) = file_cfg.get("confirm_url") {
            settings.confirm_url = v.clone();
        }
    }
}
