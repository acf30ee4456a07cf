use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info  // Production
}

// Persisted keys, shared by local storage and the cookie jar.
pub const CONSENT_KEY: &str = "jsparks_cookie_consent";
pub const PROMPT_SHOWN_KEY: &str = "jsparks_cookie_prompt_shown";
pub const ENTRY_RECORDED_KEY: &str = "jsparks_entry_recorded";
pub const VISITOR_ID_KEY: &str = "jsparks_visitor_id";
pub const ENTRY_PAGE_KEY: &str = "jsparks_entry_page";
pub const ENTRY_TIME_KEY: &str = "jsparks_entry_time";

pub const CONSENT_TTL_DAYS: u32 = 365;
pub const VISITOR_TTL_DAYS: u32 = 180;

/// Name of the global the recorded visit is exposed under for console checks.
pub const DIAGNOSTICS_GLOBAL: &str = "JSparksVisitorData";

pub const BRAND_NAME: &str = "JSparks Digitalization";
pub const BRAND_TAGLINE: &str =
    "Growth-focused digital marketing and web experiences for businesses in Pollachi and beyond.";
pub const CONTACT_EMAIL: &str = "jsparksdigitalization@gmail.com";
pub const LOCATION: &str = "Pollachi, Tamil Nadu";

/// (label, page relative to the site root)
pub const COMPANY_LINKS: &[(&str, &str)] = &[
    ("Home", "index.html"),
    ("About Us", "about.html"),
    ("Blogs", "blogs.html"),
    ("Our Clients", "partners.html"),
    ("Contact", "contact.html"),
];

pub const SERVICE_LINKS: &[(&str, &str)] = &[
    ("Web Development", "services/web-development.html"),
    ("Social Media Marketing", "services/social-media-marketing.html"),
    ("SEO", "services/search-engine-optimization.html"),
    ("Ad Campaign Strategy", "services/ad-campaign-strategy.html"),
];

pub const SOCIAL_LINKS: &[(&str, &str)] = &[
    ("Instagram", "https://www.instagram.com/jsparks_digitalization/"),
    ("Facebook", "https://www.facebook.com/profile.php?id=61586018085382"),
    ("LinkedIn", "https://www.linkedin.com/in/jsparks-digitalization-pollachi/"),
];

// Navigation
pub const NAV_SCROLLED_AFTER: f64 = 12.0;
pub const NAV_ALWAYS_VISIBLE_ABOVE: f64 = 90.0;
pub const NAV_HIDDEN_TOP: &str = "-92px";
