//! Message catalogue loading.
//!
//! Catalogues live at `<dir>/<locale>/LC_MESSAGES/cutefish-launcher.mo`. A missing
//! catalogue is normal (English) and only logged at debug level.

use gettextrs::{bind_textdomain_codeset, bindtextdomain, setlocale, textdomain, LocaleCategory};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::APP_NAME;

pub const TEXT_DOMAIN: &str = APP_NAME;

/// The user's message locale, e.g. `de_DE`, from `LC_ALL`, `LC_MESSAGES` or
/// `LANG`, in that order. Encoding and modifier suffixes are dropped; `C` and
/// `POSIX` mean no locale.
pub fn locale_from_env<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())?;

    let locale = raw
        .split(|c: char| c == '.' || c == '@')
        .next()
        .unwrap_or_default()
        .to_string();
    match locale.as_str() {
        "" | "C" | "POSIX" => None,
        _ => Some(locale),
    }
}

pub fn catalog_path(dir: &Path, locale: &str) -> PathBuf {
    dir.join(locale)
        .join("LC_MESSAGES")
        .join(format!("{}.mo", TEXT_DOMAIN))
}

/// Finds the catalogue for `locale`, falling back from `de_DE` to `de`.
fn find_catalog(dir: &Path, locale: &str) -> Option<PathBuf> {
    let language = locale.split('_').next().unwrap_or(locale);
    [locale, language]
        .iter()
        .map(|candidate| catalog_path(dir, candidate))
        .find(|path| path.is_file())
}

/// Binds the text domain to `dir` if a catalogue for the current locale exists.
/// Returns whether translations are active.
pub fn load_translations(dir: &Path) -> bool {
    let Some(locale) = locale_from_env(|key| std::env::var(key).ok()) else {
        debug!("No message locale set, skipping translations");
        return false;
    };
    let Some(catalog) = find_catalog(dir, &locale) else {
        debug!(%locale, dir = %dir.display(), "No translation catalogue");
        return false;
    };

    setlocale(LocaleCategory::LcAll, "");
    let bound = bindtextdomain(TEXT_DOMAIN, dir)
        .and_then(|_| bind_textdomain_codeset(TEXT_DOMAIN, "UTF-8").map(|_| ()))
        .and_then(|_| textdomain(TEXT_DOMAIN).map(|_| ()));
    match bound {
        Ok(()) => {
            info!(%locale, catalog = %catalog.display(), "Translations loaded");
            true
        }
        Err(e) => {
            debug!(error = %e, "Binding text domain failed");
            false
        }
    }
}

/// Translates `message`; untranslated messages come back unchanged.
pub fn tr(message: &str) -> String {
    gettextrs::gettext(message)
}
