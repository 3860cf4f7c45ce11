use serde::Deserialize;

/// Capability switches granted to one embedded editor instance.
///
/// The set is fixed and always fully populated; hosts mutate it only through
/// [`FeatureFlagsPatch`] merges or a reset back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub ai: bool,
    pub post_management: bool,
    pub css_editor: bool,
    pub export_panel: bool,
    pub upload_image: bool,
    pub write_ai_create: bool,
    pub write_ai_polish: bool,
    pub write_ai_illustrate: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            ai: true,
            post_management: true,
            css_editor: true,
            export_panel: true,
            upload_image: true,
            write_ai_create: false,
            write_ai_polish: false,
            write_ai_illustrate: false,
        }
    }
}

impl FeatureFlags {
    /// Shallow-merge `patch` onto the current flags; absent fields keep their
    /// current value.
    pub fn apply(&mut self, patch: &FeatureFlagsPatch) {
        if let Some(v) = patch.ai {
            self.ai = v;
        }
        if let Some(v) = patch.post_management {
            self.post_management = v;
        }
        if let Some(v) = patch.css_editor {
            self.css_editor = v;
        }
        if let Some(v) = patch.export_panel {
            self.export_panel = v;
        }
        if let Some(v) = patch.upload_image {
            self.upload_image = v;
        }
        if let Some(v) = patch.write_ai_create {
            self.write_ai_create = v;
        }
        if let Some(v) = patch.write_ai_polish {
            self.write_ai_polish = v;
        }
        if let Some(v) = patch.write_ai_illustrate {
            self.write_ai_illustrate = v;
        }
    }

    pub fn reset(&mut self) {
        *self = FeatureFlags::default();
    }
}

/// Partial [`FeatureFlags`] delta as handed across the host boundary.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureFlagsPatch {
    pub ai: Option<bool>,
    pub post_management: Option<bool>,
    pub css_editor: Option<bool>,
    pub export_panel: Option<bool>,
    pub upload_image: Option<bool>,
    pub write_ai_create: Option<bool>,
    pub write_ai_polish: Option<bool>,
    pub write_ai_illustrate: Option<bool>,
}

/// Configuration delta fanned out to every live instance by
/// [`Bridge::configure`](crate::bridge::Bridge::configure).
///
/// Field names deserialize from the camelCase keys the host uses on the wire.
/// Absent fields are no-ops; an unknown `theme` key is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigureOptions {
    pub theme: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub primary_color: Option<String>,
    pub is_mac_code_block: Option<bool>,
    pub is_show_line_number: Option<bool>,
    pub is_count_status: Option<bool>,
    pub is_cite_status: Option<bool>,
    pub feature_flags: Option<FeatureFlagsPatch>,
}
