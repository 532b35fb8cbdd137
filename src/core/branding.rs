//! Company logo and display name resolution

use super::company::{CompanySettings, CompanyStore};
use super::i18n::Translator;

/// Logo shown when no company logo is configured
pub const DEFAULT_LOGO: &str = "bytes://ledgerdesk/default_logo.svg";

const LEGACY_SEGMENT: &str = "/public/index.php";

/// Normalize a stored logo URL
///
/// Drops the legacy `/public/index.php` segment and rebuilds the URL as
/// `scheme//host/a/b/c` from the first six `/`-separated parts. Inputs with
/// fewer parts get a literal `undefined` in place of each missing one.
pub fn trim_logo_url(url: Option<&str>) -> Option<String> {
    let url = url.filter(|u| !u.is_empty())?;
    let cleaned = url.replacen(LEGACY_SEGMENT, "", 1);
    let parts: Vec<&str> = cleaned.split('/').collect();
    let part = |i: usize| parts.get(i).copied().unwrap_or("undefined");

    Some(format!(
        "{}//{}/{}/{}/{}",
        part(0),
        part(2),
        part(3),
        part(4),
        part(5)
    ))
}

/// Pick the logo: pending changes first, then the current company, then `fallback`
pub fn resolve_logo_url(
    overlay: Option<&CompanySettings>,
    baseline: Option<&CompanySettings>,
    fallback: &str,
) -> String {
    let overlay_logo = trim_logo_url(overlay.and_then(|s| s.company_logo.as_deref()));
    if let Some(logo) = overlay_logo.filter(|l| !l.is_empty()) {
        tracing::trace!("Using logo from pending changes");
        return logo;
    }

    let baseline_logo = trim_logo_url(baseline.and_then(|s| s.company_logo.as_deref()));
    if let Some(logo) = baseline_logo.filter(|l| !l.is_empty()) {
        tracing::trace!("Using logo from current company");
        return logo;
    }

    tracing::trace!("Using default logo");
    fallback.to_string()
}

/// The company name, or `localized_fallback` when unnamed
pub fn resolve_company_name(baseline: Option<&CompanySettings>, localized_fallback: &str) -> String {
    baseline
        .and_then(|s| s.name.as_deref())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| localized_fallback.to_string())
}

/// Logo URL for the store's company
pub fn logo_url(store: &CompanyStore) -> String {
    resolve_logo_url(
        store.changes.as_ref().map(|c| &c.settings),
        store.current.as_ref().map(|c| &c.settings),
        DEFAULT_LOGO,
    )
}

/// Display name for the store's current company
pub fn company_name(store: &CompanyStore, t: &Translator) -> String {
    resolve_company_name(
        store.current.as_ref().map(|c| &c.settings),
        &t.t("untitled_company"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(logo: Option<&str>, name: Option<&str>) -> CompanySettings {
        CompanySettings {
            company_logo: logo.map(str::to_string),
            name: name.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_trim_strips_legacy_segment() {
        assert_eq!(
            trim_logo_url(Some("https://host/public/index.php/a/b/c")),
            trim_logo_url(Some("https://host/a/b/c"))
        );
        assert_eq!(
            trim_logo_url(Some("https://host/a/b/c")).as_deref(),
            Some("https://host/a/b/c")
        );
    }

    #[test]
    fn test_trim_drops_extra_depth() {
        assert_eq!(
            trim_logo_url(Some("https://host/a/b/c/d.png")).as_deref(),
            Some("https://host/a/b/c")
        );
    }

    #[test]
    fn test_trim_short_url_yields_undefined_segments() {
        assert_eq!(
            trim_logo_url(Some("https://host/logo.png")).as_deref(),
            Some("https://host/logo.png/undefined/undefined")
        );
    }

    #[test]
    fn test_trim_empty_or_missing() {
        assert_eq!(trim_logo_url(None), None);
        assert_eq!(trim_logo_url(Some("")), None);
    }

    #[test]
    fn test_overlay_logo_wins() {
        let overlay = settings(Some("https://new.example/x/y/z"), None);
        for baseline in [None, Some(settings(Some("https://old.example/a/b/c"), None))] {
            assert_eq!(
                resolve_logo_url(Some(&overlay), baseline.as_ref(), DEFAULT_LOGO),
                "https://new.example/x/y/z"
            );
        }
    }

    #[test]
    fn test_baseline_logo_when_overlay_empty() {
        let baseline = settings(Some("https://old.example/public/index.php/a/b/c"), None);
        for overlay in [None, Some(settings(None, None)), Some(settings(Some(""), None))] {
            assert_eq!(
                resolve_logo_url(overlay.as_ref(), Some(&baseline), DEFAULT_LOGO),
                "https://old.example/a/b/c"
            );
        }
    }

    #[test]
    fn test_fallback_when_no_logo() {
        assert_eq!(resolve_logo_url(None, None, "fallback.png"), "fallback.png");
        let empty = settings(Some(""), None);
        assert_eq!(
            resolve_logo_url(Some(&empty), Some(&empty), "fallback.png"),
            "fallback.png"
        );
    }

    #[test]
    fn test_company_name_fallback() {
        let named = settings(None, Some("Acme"));
        let blank = settings(None, Some(""));
        assert_eq!(resolve_company_name(Some(&named), "Untitled"), "Acme");
        assert_eq!(resolve_company_name(Some(&blank), "Untitled"), "Untitled");
        assert_eq!(resolve_company_name(None, "Untitled"), "Untitled");
    }

    #[test]
    fn test_store_accessors() {
        let mut store = CompanyStore::default();
        let t = Translator::default();
        assert_eq!(logo_url(&store), DEFAULT_LOGO);
        assert_eq!(company_name(&store, &t), t.t("untitled_company"));

        store.stage().settings.company_logo = Some("https://cdn.example/a/b/c".into());
        store.stage().settings.name = Some("Pending Name".into());
        assert_eq!(logo_url(&store), "https://cdn.example/a/b/c");
        assert_eq!(company_name(&store, &t), t.t("untitled_company"));
    }
}
