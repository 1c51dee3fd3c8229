/// Options requested from the host when the GL context is acquired.
///
/// Defaults follow the WebGL context attribute defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ContextConfig {
    /// The drawing buffer has an alpha channel.
    pub alpha: bool,
    /// Request a multisampled drawing buffer.
    pub antialias: bool,
    /// Keep the drawing buffer contents after presenting.
    pub preserve_drawing_buffer: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            alpha: true,
            antialias: true,
            preserve_drawing_buffer: false,
        }
    }
}

impl ContextConfig {
    /// Sets [`alpha`](Self::alpha).
    #[must_use]
    pub fn alpha(mut self, alpha: bool) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets [`antialias`](Self::antialias).
    #[must_use]
    pub fn antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    /// Sets [`preserve_drawing_buffer`](Self::preserve_drawing_buffer).
    #[must_use]
    pub fn preserve_drawing_buffer(mut self, preserve: bool) -> Self {
        self.preserve_drawing_buffer = preserve;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_webgl() {
        let config = ContextConfig::default();
        assert!(config.alpha);
        assert!(config.antialias);
        assert!(!config.preserve_drawing_buffer);
    }

    #[test]
    fn builder_overrides() {
        let config = ContextConfig::default()
            .alpha(false)
            .preserve_drawing_buffer(true);
        assert!(!config.alpha);
        assert!(config.antialias);
        assert!(config.preserve_drawing_buffer);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_camel_case() {
        let config: ContextConfig =
            serde_json::from_str(r#"{ "alpha": false, "preserveDrawingBuffer": true }"#).unwrap();
        assert_eq!(
            config,
            ContextConfig { alpha: false, antialias: true, preserve_drawing_buffer: true }
        );

        let json = serde_json::to_string(&ContextConfig::default()).unwrap();
        assert_eq!(
            json,
            r#"{"alpha":true,"antialias":true,"preserveDrawingBuffer":false}"#
        );
    }
}
