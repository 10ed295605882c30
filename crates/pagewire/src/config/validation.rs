use crate::config::PageConfig;
use crate::error::{PageError, Result};

fn require_non_empty(field: &str, value: &str, hint: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PageError::invalid(field, hint));
    }
    Ok(())
}

/// Class names end up in `classList.add`, which throws on whitespace.
fn validate_class_name(field: &str, value: &str) -> Result<()> {
    require_non_empty(field, value, "Class name cannot be empty")?;
    if let Some(c) = value.chars().find(|c| c.is_whitespace()) {
        return Err(PageError::invalid(
            field,
            format!("Class name cannot contain whitespace (got {:?} in '{}')", c, value),
        ));
    }
    Ok(())
}

fn validate_length(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PageError::invalid(
            field,
            format!("Must be a finite number (got {})", value),
        ));
    }
    Ok(())
}

impl PageConfig {
    /// Validate configuration before anything is installed on the page.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.selectors.fields() {
            require_non_empty(field, value, "Selector cannot be empty")?;
        }

        let c = &self.classes;
        validate_class_name("classes.active", &c.active)?;
        validate_class_name("classes.navShown", &c.nav_shown)?;
        validate_class_name("classes.mobileToggle", &c.mobile_toggle)?;
        validate_class_name("classes.copyButton", &c.copy_button)?;

        validate_length("scroll.headerOffset", self.scroll.header_offset)?;
        validate_length("scroll.spyLookahead", self.scroll.spy_lookahead)?;
        validate_length("scroll.mobileBreakpoint", self.scroll.mobile_breakpoint)?;
        if self.scroll.mobile_breakpoint <= 0.0 {
            return Err(PageError::invalid(
                "scroll.mobileBreakpoint",
                "Must be greater than zero",
            ));
        }

        require_non_empty("copy.label", &self.copy.label, "Label cannot be empty")?;
        require_non_empty(
            "copy.copiedLabel",
            &self.copy.copied_label,
            "Label cannot be empty",
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: PageError) -> String {
        match err {
            PageError::InvalidConfig { field, .. } => field,
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(PageConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_selector_is_rejected() {
        let mut config = PageConfig::default();
        config.selectors.code_blocks = "  ".to_string();
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "selectors.codeBlocks"
        );
    }

    #[test]
    fn class_with_space_is_rejected() {
        let mut config = PageConfig::default();
        config.classes.active = "is active".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("whitespace"));
        assert_eq!(field_of(err), "classes.active");
    }

    #[test]
    fn non_positive_breakpoint_is_rejected() {
        let mut config = PageConfig::default();
        config.scroll.mobile_breakpoint = 0.0;
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "scroll.mobileBreakpoint"
        );
    }

    #[test]
    fn nan_offset_is_rejected() {
        let mut config = PageConfig::default();
        config.scroll.header_offset = f64::NAN;
        assert_eq!(
            field_of(config.validate().unwrap_err()),
            "scroll.headerOffset"
        );
    }

    #[test]
    fn negative_offsets_are_allowed() {
        let mut config = PageConfig::default();
        config.scroll.header_offset = -10.0;
        config.scroll.spy_lookahead = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_copied_label_is_rejected() {
        let mut config = PageConfig::default();
        config.copy.copied_label.clear();
        assert_eq!(field_of(config.validate().unwrap_err()), "copy.copiedLabel");
    }
}
