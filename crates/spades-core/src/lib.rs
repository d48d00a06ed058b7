pub mod game;
pub mod model;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "spades"
    }

    pub const fn title() -> &'static str {
        "Cutthroat Spades"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "spades");
        assert_eq!(AppInfo::title(), "Cutthroat Spades");
        assert!(!AppInfo::version().is_empty());
    }
}
