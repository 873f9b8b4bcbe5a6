use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aspect ratios accepted by the text-to-image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    #[value(name = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    #[value(name = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    #[value(name = "4:3")]
    Landscape,
    #[serde(rename = "9:16")]
    #[value(name = "9:16")]
    Tall,
    #[serde(rename = "16:9")]
    #[value(name = "16:9")]
    Wide,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Tall => "9:16",
            AspectRatio::Wide => "16:9",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    #[default]
    Photorealistic,
    Cinematic,
    Anime,
    DigitalArt,
    Watercolor,
    OilPainting,
    #[value(name = "3d-render")]
    #[serde(rename = "3d-render")]
    Render3d,
    PixelArt,
}

impl Style {
    /// Wording spliced into the synthesized prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Photorealistic => "photorealistic",
            Style::Cinematic => "cinematic",
            Style::Anime => "anime",
            Style::DigitalArt => "digital art",
            Style::Watercolor => "watercolor",
            Style::OilPainting => "oil painting",
            Style::Render3d => "3D render",
            Style::PixelArt => "pixel art",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    #[default]
    Standard,
    High,
    Ultra,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Standard => "standard",
            Quality::High => "high",
            Quality::Ultra => "ultra",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_wire_values() {
        assert_eq!(AspectRatio::Square.as_str(), "1:1");
        assert_eq!(AspectRatio::Wide.to_string(), "16:9");
        assert_eq!(
            serde_json::to_string(&AspectRatio::Tall).unwrap(),
            "\"9:16\""
        );
        assert_eq!(
            AspectRatio::from_str("3:4", false).unwrap(),
            AspectRatio::Portrait
        );
    }

    #[test]
    fn test_style_and_quality_wording() {
        assert_eq!(Style::DigitalArt.to_string(), "digital art");
        assert_eq!(Style::from_str("3d-render", false).unwrap(), Style::Render3d);
        assert_eq!(Quality::Ultra.to_string(), "ultra");
        assert_eq!(Quality::default(), Quality::Standard);
    }
}
