use crate::config::Language;
use crate::models::Theme;

/// The handful of texts the command line front end prints, per language.
///
/// Error messages are not translated.
#[derive(Debug, PartialEq, Eq)]
pub struct Messages {
    pub logged_in_as: &'static str,
    pub logged_out: &'static str,
    pub not_logged_in: &'static str,
    pub known_users: &'static str,
    pub user: &'static str,
    pub balance: &'static str,
    pub bottles_label: &'static str,
    pub status: &'static str,
    pub records: &'static str,
    pub quick_amounts: &'static str,
    pub theme: &'static str,
    pub synced: &'static str,
    pub offline: &'static str,
    pub last_7_days: &'static str,
    pub bottles: &'static str,
    pub nothing_to_deposit: &'static str,
    pub take_out_prompt: &'static str,
    pub no_transactions: &'static str,
    pub exported: &'static str,
    pub clear_confirm: &'static str,
    pub history_cleared: &'static str,
    pub reset_confirm: &'static str,
    pub reset_done: &'static str,
    pub light_theme: &'static str,
    pub dark_theme: &'static str,
}

pub const ENGLISH: Messages = Messages {
    logged_in_as: "Logged in as",
    logged_out: "Logged out",
    not_logged_in: "Not logged in",
    known_users: "Known users",
    user: "User",
    balance: "Balance",
    bottles_label: "Bottles",
    status: "Status",
    records: "Records",
    quick_amounts: "Quick",
    theme: "Theme",
    synced: "Synced",
    offline: "Offline",
    last_7_days: "Last 7 Days",
    bottles: "bottles",
    nothing_to_deposit: "Nothing to deposit",
    take_out_prompt: "Bottles to take out",
    no_transactions: "No transactions yet",
    exported: "Exported transactions",
    clear_confirm: "Clear all transaction history?",
    history_cleared: "History cleared",
    reset_confirm: "Reset everything? This will clear all data.",
    reset_done: "Reset done",
    light_theme: "Light Theme",
    dark_theme: "Dark Theme",
};

pub const GERMAN: Messages = Messages {
    logged_in_as: "Angemeldet als",
    logged_out: "Abgemeldet",
    not_logged_in: "Nicht angemeldet",
    known_users: "Bekannte Nutzer",
    user: "Nutzer",
    balance: "Guthaben",
    bottles_label: "Flaschen",
    status: "Status",
    records: "Einträge",
    quick_amounts: "Beträge",
    theme: "Design",
    synced: "Synchronisiert",
    offline: "Offline",
    last_7_days: "Letzte 7 Tage",
    bottles: "Flaschen",
    nothing_to_deposit: "Nichts einzuzahlen",
    take_out_prompt: "Bitte herausnehmen",
    no_transactions: "Noch keine Transaktionen",
    exported: "Transaktionen exportiert",
    clear_confirm: "Gesamte Transaktionshistorie löschen?",
    history_cleared: "Verlauf gelöscht",
    reset_confirm: "Alles zurücksetzen? Dies löscht alle Daten.",
    reset_done: "Zurückgesetzt",
    light_theme: "Helles Design",
    dark_theme: "Dunkles Design",
};

impl Messages {
    pub fn for_language(language: Language) -> &'static Messages {
        match language {
            Language::En => &ENGLISH,
            Language::De => &GERMAN,
        }
    }

    pub fn theme_name(&self, theme: Theme) -> &'static str {
        match theme {
            Theme::Light => self.light_theme,
            Theme::Dark => self.dark_theme,
        }
    }

    pub fn connectivity(&self, online: bool) -> &'static str {
        if online { self.synced } else { self.offline }
    }
}
