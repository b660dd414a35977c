//! Document shell shared by every page.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use cmsite_core::model::ColorTheme;
use cmsite_core::PresentationMeta;
use cmsite_core::route::HASH_MARKERS;

/// Toggles `is-visible` on `[data-reveal]` sections as they enter the
/// viewport, keeps the `?hash=` parameter in step with the routing part of
/// the hash fragment, and opens the sign-in dialog for in-page actions.
///
/// Expects `ROUTE_HASH_MARKERS` to be defined before it runs.
const CLIENT_SCRIPT: &str = r"
(function () {
  var io = new IntersectionObserver(function (entries) {
    entries.forEach(function (e) { e.target.classList.toggle('is-visible', e.isIntersecting); });
  }, { threshold: 0.1 });
  document.querySelectorAll('[data-reveal]').forEach(function (el) { io.observe(el); });

  function routeHash() {
    var hash = location.hash;
    return ROUTE_HASH_MARKERS.some(function (m) { return hash.indexOf(m) !== -1; }) ? hash : '';
  }

  function forwardHash() {
    var params = new URLSearchParams(location.search);
    var hash = routeHash();
    if ((params.get('hash') || '') === hash) { return; }
    if (hash) { params.set('hash', hash); } else { params.delete('hash'); }
    var query = params.toString();
    location.replace(location.pathname + (query ? '?' + query : '') + location.hash);
  }
  forwardHash();
  window.addEventListener('hashchange', forwardHash);
  window.addEventListener('popstate', forwardHash);

  var dialog = document.getElementById('login');
  document.querySelectorAll('[data-action=login]').forEach(function (el) {
    el.addEventListener('click', function () { if (dialog) { dialog.showModal(); } });
  });
})();
";

/// Marker list for the client script, as a JS statement.
fn hash_markers_script() -> String {
    let markers = HASH_MARKERS
        .iter()
        .map(|m| format!("'{m}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("var ROUTE_HASH_MARKERS = [{markers}];")
}

const BASE_STYLE: &str = "
body { margin: 0; font-family: system-ui, sans-serif; background: var(--color-background); color: var(--color-text); }
a { color: var(--color-primary); }
.btn-primary { background: var(--color-primary); color: var(--color-background); }
.btn-secondary { background: var(--color-secondary); color: var(--color-background); }
.section-description, .role { color: var(--color-neutral); }
[data-reveal] { opacity: 0; transition: opacity .5s, transform .5s; }
[data-reveal].is-visible { opacity: 1; transform: none; }
.reveal-up { transform: translateY(2rem); }
";

fn theme_vars(theme: &ColorTheme) -> String {
    format!(
        ":root {{ --color-primary: {}; --color-secondary: {}; --color-accent: {}; \
         --color-neutral: {}; --color-background: {}; --color-text: {}; }}",
        css_value(&theme.primary_color),
        css_value(&theme.secondary_color),
        css_value(&theme.accent_color),
        css_value(&theme.neutral_color),
        css_value(&theme.background_color),
        css_value(&theme.text_color),
    )
}

/// Strip characters that could close the declaration or the style element.
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect()
}

/// Full HTML document around `body`.
pub fn document(meta: &PresentationMeta, theme: &ColorTheme, body: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (meta.title) }
                @if let Some(description) = &meta.description {
                    meta name="description" content=(description);
                    meta property="og:description" content=(description);
                }
                meta property="og:title" content=(meta.title);
                @if let Some(image) = &meta.og_image {
                    meta property="og:image" content=(image);
                }
                style { (PreEscaped(theme_vars(theme))) (PreEscaped(BASE_STYLE)) }
            }
            body {
                (body)
                dialog id="login" {
                    form method="dialog" {
                        h2 { "Sign in" }
                        button type="submit" { "Close" }
                    }
                }
                script { (PreEscaped(hash_markers_script())) (PreEscaped(CLIENT_SCRIPT)) }
            }
        }
    }
}
