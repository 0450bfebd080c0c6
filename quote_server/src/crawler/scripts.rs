//! Page-side scripts run by the crawl directives.
//!
//! All scripts are self-invoking expressions that return nothing; they are
//! evaluated with `Runtime.evaluate`, so they use plain `function` syntax only.

/// Removes cookie banners, modals and fixed overlays that cover the content.
pub const REMOVE_OVERLAYS: &str = r#"
(function() {
    var selectors = [
        '[class*="consent"]', '[id*="consent"]',
        '[class*="cookie"]', '[id*="cookie"]',
        '[class*="modal"]', '[class*="overlay"]', '[class*="popup"]',
        '[role="dialog"]', '[aria-modal="true"]'
    ];
    selectors.forEach(function(selector) {
        document.querySelectorAll(selector).forEach(function(el) {
            if (el !== document.body && el !== document.documentElement) {
                el.remove();
            }
        });
    });
    var viewport = window.innerWidth * window.innerHeight;
    document.querySelectorAll('body *').forEach(function(el) {
        var style = window.getComputedStyle(el);
        if (style.position !== 'fixed' && style.position !== 'sticky') {
            return;
        }
        var rect = el.getBoundingClientRect();
        var z = parseInt(style.zIndex, 10) || 0;
        if (z >= 100 && rect.width * rect.height >= viewport * 0.3) {
            el.remove();
        }
    });
    document.body.style.overflow = 'auto';
})();
"#;

/// Replaces links to other hosts with their children.
pub const STRIP_EXTERNAL_LINKS: &str = r#"
(function() {
    var host = window.location.hostname;
    document.querySelectorAll('a[href]').forEach(function(a) {
        var target;
        try {
            target = new URL(a.getAttribute('href'), window.location.href);
        } catch (e) {
            return;
        }
        if (target.hostname && target.hostname !== host) {
            a.replaceWith.apply(a, Array.prototype.slice.call(a.childNodes));
        }
    });
})();
"#;
