//! Static page metadata: title, description, social cards, crawler tags, icons
//! and the JSON-LD block. Nothing here depends on runtime state except the
//! canonical site URL taken from configuration.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SocialImage {
    pub url: &'static str,
    pub width: u32,
    pub height: u32,
    pub alt: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenGraph {
    pub title: &'static str,
    pub description: &'static str,
    pub site_name: &'static str,
    pub image: SocialImage,
    pub locale: &'static str,
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub creator: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct IconLink {
    pub rel: &'static str,
    pub href: &'static str,
    pub sizes: Option<&'static str>,
    pub mime: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageMetadata {
    pub site_url: String,
    pub app_name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub author: &'static str,
    pub creator: &'static str,
    pub publisher: &'static str,
    pub category: &'static str,
    pub classification: &'static str,
    pub referrer: &'static str,
    pub color_scheme: &'static str,
    pub theme_color_light: &'static str,
    pub theme_color_dark: &'static str,
    pub manifest: &'static str,
    pub apple_web_app_title: &'static str,
    pub google_verification: &'static str,
    pub robots: &'static str,
    pub googlebot: &'static str,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub icons: &'static [IconLink],
    /// `<meta name=.. content=..>` pairs for crawlers and mobile browsers.
    pub extra_meta: &'static [(&'static str, &'static str)],
    pub preconnect: &'static [(&'static str, bool)],
}

const KEYWORDS: &[&str] = &[
    "energy calculator",
    "daily energy levels",
    "energy boost",
    "increase energy",
    "productivity calculator",
    "energy solutions",
    "fatigue calculator",
    "energy assessment",
    "boost energy naturally",
    "energy tracker",
    "vitality calculator",
    "energy optimization",
];

const ICONS: &[IconLink] = &[
    IconLink { rel: "icon", href: "/favicon.ico", sizes: None, mime: None },
    IconLink { rel: "apple-touch-icon", href: "/apple-touch-icon.png", sizes: Some("180x180"), mime: None },
    IconLink { rel: "icon", href: "/favicon-32x32.png", sizes: Some("32x32"), mime: Some("image/png") },
    IconLink { rel: "icon", href: "/favicon-16x16.png", sizes: Some("16x16"), mime: Some("image/png") },
];

const EXTRA_META: &[(&str, &str)] = &[
    ("viewport", "width=device-width, initial-scale=1"),
    ("language", "English"),
    ("revisit-after", "7 days"),
    ("rating", "general"),
    ("distribution", "global"),
    ("target", "all"),
    ("audience", "all"),
    ("coverage", "worldwide"),
    ("subject", "Energy Calculator, Health, Wellness, Productivity"),
    (
        "abstract",
        "Peakly helps you calculate your daily energy levels and provides personalized solutions to boost your energy naturally.",
    ),
    ("topic", "Energy, Health, Wellness, Productivity Calculator"),
    ("summary", "Free online energy calculator with personalized energy-boosting solutions"),
    ("pagename", "Peakly - Energy Calculator"),
    ("page-topic", "Energy Calculator and Wellness Solutions"),
    ("page-type", "Health and Wellness Tool"),
    ("format-detection", "telephone=no, date=no, email=no, address=no"),
    ("mobile-web-app-capable", "yes"),
    ("apple-mobile-web-app-capable", "yes"),
    ("apple-mobile-web-app-status-bar-style", "default"),
    ("application-name", "Peakly"),
    ("msapplication-TileColor", "#ffffff"),
];

const PRECONNECT: &[(&str, bool)] = &[("https://fonts.googleapis.com", false), ("https://fonts.gstatic.com", true)];

impl PageMetadata {
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into().trim_end_matches('/').to_string(),
            app_name: "Peakly",
            title: "Peakly - Daily Energy Calculator & Boost Solutions | Increase Your Energy Levels",
            description: "Calculate your daily energy levels with Peakly's free energy calculator. Get personalized solutions to boost your energy, improve productivity, and feel more energized throughout the day.",
            keywords: KEYWORDS,
            author: "Peakly Team",
            creator: "Peakly",
            publisher: "Peakly",
            category: "Health & Wellness",
            classification: "Health and Wellness Calculator",
            referrer: "origin-when-cross-origin",
            color_scheme: "light dark",
            theme_color_light: "#ffffff",
            theme_color_dark: "#000000",
            manifest: "/manifest.json",
            apple_web_app_title: "Peakly Energy Calculator",
            google_verification: "your-google-verification-code",
            robots: "index, follow, nocache",
            googlebot: "index, follow, max-video-preview:-1, max-image-preview:large, max-snippet:-1",
            open_graph: OpenGraph {
                title: "Peakly - Free Daily Energy Calculator & Personalized Energy Solutions",
                description: "Discover your daily energy potential with our free calculator. Get instant, personalized recommendations to boost your energy levels and maximize your productivity.",
                site_name: "Peakly",
                image: SocialImage {
                    url: "/og-image.jpg",
                    width: 1200,
                    height: 630,
                    alt: "Peakly Energy Calculator - Boost Your Daily Energy Levels",
                },
                locale: "en_US",
                kind: "website",
            },
            twitter: TwitterCard {
                card: "summary_large_image",
                title: "Peakly - Calculate & Boost Your Daily Energy Levels",
                description: "Free energy calculator with personalized solutions to increase your energy and productivity. Start your energy transformation today!",
                image: "/twitter-image.jpg",
                creator: "@peakly",
            },
            icons: ICONS,
            extra_meta: EXTRA_META,
            preconnect: PRECONNECT,
        }
    }

    fn absolute(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.site_url, path)
        }
    }

    /// JSON-LD block describing the page as a free web application.
    pub fn structured_data(&self) -> serde_json::Value {
        serde_json::json!({
            "@context": "https://schema.org",
            "@type": "WebApplication",
            "name": "Peakly Energy Calculator",
            "description": "Calculate your daily energy levels and get personalized solutions to boost your energy naturally",
            "url": self.site_url,
            "applicationCategory": "HealthApplication",
            "operatingSystem": "Web Browser",
            "offers": {
                "@type": "Offer",
                "price": "0",
                "priceCurrency": "USD"
            },
            "aggregateRating": {
                "@type": "AggregateRating",
                "ratingValue": "4.8",
                "ratingCount": "1250"
            },
            "author": {
                "@type": "Organization",
                "name": "Peakly"
            },
            "publisher": {
                "@type": "Organization",
                "name": "Peakly",
                "logo": {
                    "@type": "ImageObject",
                    "url": self.absolute("/logo.png")
                }
            },
            "datePublished": "2024-01-01",
            "dateModified": "2024-07-17",
            "inLanguage": "en-US",
            "isAccessibleForFree": true,
            "browserRequirements": "Requires JavaScript. Requires HTML5.",
            "softwareVersion": "1.0"
        })
    }

    /// Web app manifest served at `manifest`.
    pub fn web_manifest(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.apple_web_app_title,
            "short_name": self.app_name,
            "description": self.description,
            "start_url": "/",
            "display": "standalone",
            "background_color": self.theme_color_light,
            "theme_color": self.theme_color_light,
            "categories": ["health", "lifestyle", "productivity"],
            "icons": self.icons.iter().filter(|i| i.mime.is_some()).map(|i| serde_json::json!({
                "src": i.href,
                "sizes": i.sizes,
                "type": i.mime,
            })).collect::<Vec<_>>(),
        })
    }

    /// Everything that goes inside `<head>` apart from stylesheets and scripts.
    pub fn render_head(&self) -> String {
        let mut out = String::new();
        let mut meta = |name: &str, content: &str| {
            out.push_str(&format!(
                "<meta name=\"{}\" content=\"{}\">\n",
                html_escape(name),
                html_escape(content)
            ));
        };
        meta("description", self.description);
        meta("keywords", &self.keywords.join(","));
        meta("author", self.author);
        meta("creator", self.creator);
        meta("publisher", self.publisher);
        meta("category", self.category);
        meta("classification", self.classification);
        meta("referrer", self.referrer);
        meta("color-scheme", self.color_scheme);
        meta("robots", self.robots);
        meta("googlebot", self.googlebot);
        meta("google-site-verification", self.google_verification);
        meta("apple-mobile-web-app-title", self.apple_web_app_title);
        meta("url", &self.site_url);
        meta("identifier-URL", &self.site_url);
        for (name, content) in self.extra_meta {
            meta(*name, *content);
        }
        meta("twitter:card", self.twitter.card);
        meta("twitter:title", self.twitter.title);
        meta("twitter:description", self.twitter.description);
        meta("twitter:image", &self.absolute(self.twitter.image));
        meta("twitter:creator", self.twitter.creator);

        let mut head = format!("<title>{}</title>\n", html_escape(self.title));
        head.push_str(&out);
        head.push_str(&format!(
            "<meta name=\"theme-color\" media=\"(prefers-color-scheme: light)\" content=\"{}\">\n",
            self.theme_color_light
        ));
        head.push_str(&format!(
            "<meta name=\"theme-color\" media=\"(prefers-color-scheme: dark)\" content=\"{}\">\n",
            self.theme_color_dark
        ));

        let og = &self.open_graph;
        for (property, content) in [
            ("og:title", og.title.to_string()),
            ("og:description", og.description.to_string()),
            ("og:url", self.site_url.clone()),
            ("og:site_name", og.site_name.to_string()),
            ("og:image", self.absolute(og.image.url)),
            ("og:image:width", og.image.width.to_string()),
            ("og:image:height", og.image.height.to_string()),
            ("og:image:alt", og.image.alt.to_string()),
            ("og:locale", og.locale.to_string()),
            ("og:type", og.kind.to_string()),
        ] {
            head.push_str(&format!(
                "<meta property=\"{}\" content=\"{}\">\n",
                property,
                html_escape(&content)
            ));
        }

        head.push_str(&format!("<link rel=\"canonical\" href=\"{}\">\n", html_escape(&self.site_url)));
        head.push_str(&format!("<link rel=\"manifest\" href=\"{}\">\n", self.manifest));
        for icon in self.icons {
            let mut link = format!("<link rel=\"{}\" href=\"{}\"", icon.rel, icon.href);
            if let Some(mime) = icon.mime {
                link.push_str(&format!(" type=\"{}\"", mime));
            }
            if let Some(sizes) = icon.sizes {
                link.push_str(&format!(" sizes=\"{}\"", sizes));
            }
            link.push_str(">\n");
            head.push_str(&link);
        }
        for (href, cross_origin) in self.preconnect {
            let co = if *cross_origin { " crossorigin=\"anonymous\"" } else { "" };
            head.push_str(&format!("<link rel=\"preconnect\" href=\"{}\"{}>\n", href, co));
        }
        // `</` cannot appear inside the script body.
        let json_ld = self.structured_data().to_string().replace("</", "<\\/");
        head.push_str(&format!("<script type=\"application/ld+json\">{}</script>\n", json_ld));
        head
    }
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self::new("https://peakly.com")
    }
}

/// Escapes text for HTML element content and double-quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_ld_of(head: &str) -> serde_json::Value {
        let start = head.find("application/ld+json\">").unwrap() + "application/ld+json\">".len();
        let end = head[start..].find("</script>").unwrap() + start;
        serde_json::from_str(&head[start..end]).unwrap()
    }

    #[test]
    fn head_has_title_canonical_and_json_ld() {
        let head = PageMetadata::default().render_head();
        assert!(head.contains(
            "<title>Peakly - Daily Energy Calculator &amp; Boost Solutions | Increase Your Energy Levels</title>"
        ));
        assert!(head.contains("<link rel=\"canonical\" href=\"https://peakly.com\">"));
        let ld = json_ld_of(&head);
        assert_eq!(ld["@type"], "WebApplication");
        assert_eq!(ld["offers"]["price"], "0");
        assert_eq!(ld["isAccessibleForFree"], true);
        assert_eq!(ld["browserRequirements"], "Requires JavaScript. Requires HTML5.");
    }

    #[test]
    fn social_cards_use_absolute_urls() {
        let head = PageMetadata::new("https://example.test/").render_head();
        assert!(head.contains("<meta property=\"og:image\" content=\"https://example.test/og-image.jpg\">"));
        assert!(head.contains("<meta name=\"twitter:image\" content=\"https://example.test/twitter-image.jpg\">"));
        assert!(head.contains("<meta property=\"og:url\" content=\"https://example.test\">"));
    }

    #[test]
    fn keywords_and_crawler_tags() {
        let md = PageMetadata::default();
        assert_eq!(md.keywords.len(), 12);
        let head = md.render_head();
        assert!(head.contains("energy calculator,daily energy levels"));
        assert!(head.contains("<meta name=\"revisit-after\" content=\"7 days\">"));
        assert!(head.contains("<meta name=\"robots\" content=\"index, follow, nocache\">"));
        assert!(head.contains("rel=\"apple-touch-icon\" href=\"/apple-touch-icon.png\" sizes=\"180x180\""));
        assert!(head.contains("crossorigin=\"anonymous\""));
    }

    #[test]
    fn manifest_lists_png_icons() {
        let manifest = PageMetadata::default().web_manifest();
        assert_eq!(manifest["short_name"], "Peakly");
        assert_eq!(manifest["icons"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn escape_covers_quotes() {
        assert_eq!(html_escape("<a href=\"x\">'&'</a>"), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
