use serde::Serialize;

use crate::services::tile_classifier::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    #[serde(rename = "CAT")]
    Cat,
    #[serde(rename = "ES")]
    Es,
    #[serde(rename = "EN")]
    En,
}

/// User-facing strings for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub intro: &'static str,
    pub coral: &'static str,
    pub fish: &'static str,
    pub both: &'static str,
    pub copies: &'static str,
    pub types: &'static str,
    pub distribution_tiles: &'static str,
    pub distribution_types: &'static str,
    #[serde(skip)]
    selected_tiles: &'static str,
}

const CAT_LABELS: Labels = Labels {
    intro: "Aquest programa realitza la selecció automàtica i balancejada de llosetes per al joc Shallow Sea.",
    coral: "Corall",
    fish: "Peix",
    both: "Corall i peix",
    copies: "còpies",
    types: "tipus",
    distribution_tiles: "Distribució per llosetes:",
    distribution_types: "Distribució per tipus:",
    selected_tiles: "Llosetes seleccionades per a {n} jugadors:",
};

const ES_LABELS: Labels = Labels {
    intro: "Este programa realiza la selección automática y balanceada de losetas para el juego Shallow Sea.",
    coral: "Coral",
    fish: "Pez",
    both: "Coral y pez",
    copies: "copias",
    types: "tipos",
    distribution_tiles: "Distribución por losetas:",
    distribution_types: "Distribución por tipos:",
    selected_tiles: "Losetas seleccionadas para {n} jugadores:",
};

const EN_LABELS: Labels = Labels {
    intro: "This program performs automatic balanced tile selection for Shallow Sea.",
    coral: "Coral",
    fish: "Fish",
    both: "Coral and fish",
    copies: "copies",
    types: "types",
    distribution_tiles: "Distribution by pieces:",
    distribution_types: "Distribution by types:",
    selected_tiles: "Selected tiles for {n} players:",
};

impl Language {
    pub const ALL: [Language; 3] = [Language::Cat, Language::Es, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Cat => "CAT",
            Language::Es => "ES",
            Language::En => "EN",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Cat => "Català",
            Language::Es => "Español",
            Language::En => "English",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "CAT" => Some(Language::Cat),
            "ES" => Some(Language::Es),
            "EN" => Some(Language::En),
            _ => None,
        }
    }

    /// Picks the language from the first tag of an `Accept-Language` header
    pub fn from_accept_language(header: &str) -> Self {
        let primary = header
            .split(',')
            .next()
            .and_then(|tag| tag.split(['-', ';']).next())
            .map(|tag| tag.trim().to_lowercase())
            .unwrap_or_default();

        match primary.as_str() {
            "ca" => Language::Cat,
            "es" => Language::Es,
            _ => Language::En,
        }
    }

    /// An explicit `lang` parameter wins, even an unknown one (which means
    /// English); otherwise the browser's preference decides.
    pub fn resolve(lang: Option<&str>, accept_language: Option<&str>) -> Self {
        match (lang, accept_language) {
            (Some(code), _) => Language::from_code(code).unwrap_or(Language::En),
            (None, Some(header)) => Language::from_accept_language(header),
            (None, None) => Language::En,
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Language::Cat => &CAT_LABELS,
            Language::Es => &ES_LABELS,
            Language::En => &EN_LABELS,
        }
    }
}

impl Labels {
    pub fn category(&self, category: Category) -> &'static str {
        match category {
            Category::Coral => self.coral,
            Category::Fish => self.fish,
            Category::Both => self.both,
        }
    }

    pub fn selected_heading(&self, players: u8) -> String {
        self.selected_tiles.replace("{n}", &players.to_string())
    }
}
