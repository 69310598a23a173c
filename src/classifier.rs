use image::{GrayImage, Luma};
use serde::Serialize;

use crate::distortion::NormalizedDistortion;
use crate::thresholds::ThresholdSet;

/// Per-pixel classification result, stored as its one-byte label code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Label {
    Background = 1,
    Shadow = 2,
    Highlight = 3,
    Foreground = 4,
}

impl Label {
    pub const ALL: [Label; 4] = [
        Label::Background,
        Label::Shadow,
        Label::Highlight,
        Label::Foreground,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Label> {
        match code {
            1 => Some(Label::Background),
            2 => Some(Label::Shadow),
            3 => Some(Label::Highlight),
            4 => Some(Label::Foreground),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Label::Background => "background",
            Label::Shadow => "shadow",
            Label::Highlight => "highlight",
            Label::Foreground => "foreground",
        }
    }
}

pub fn is_foreground(d: &NormalizedDistortion, t: &ThresholdSet) -> bool {
    d.chromaticity > t.chromaticity
}

pub fn is_shadow(d: &NormalizedDistortion, _t: &ThresholdSet) -> bool {
    d.brightness < 0.0
}

/// Closed band `T_bl <= bn <= T_bu`.
pub fn is_background_band(d: &NormalizedDistortion, t: &ThresholdSet) -> bool {
    t.brightness_lower <= d.brightness && d.brightness <= t.brightness_upper
}

/// A predicate paired with the label it assigns.
#[derive(Clone, Copy)]
pub struct DecisionRule {
    pub label: Label,
    pub predicate: fn(&NormalizedDistortion, &ThresholdSet) -> bool,
}

/// Rules in priority order; the first match wins.
pub const DECISION_RULES: [DecisionRule; 3] = [
    DecisionRule {
        label: Label::Foreground,
        predicate: is_foreground,
    },
    DecisionRule {
        label: Label::Shadow,
        predicate: is_shadow,
    },
    DecisionRule {
        label: Label::Background,
        predicate: is_background_band,
    },
];

/// Label of pixels no rule matches.
pub const DEFAULT_LABEL: Label = Label::Highlight;

pub fn decide(d: &NormalizedDistortion, thresholds: &ThresholdSet) -> Label {
    DECISION_RULES
        .iter()
        .find(|rule| (rule.predicate)(d, thresholds))
        .map(|rule| rule.label)
        .unwrap_or(DEFAULT_LABEL)
}

/// Number of pixels per label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    pub background: usize,
    pub shadow: usize,
    pub highlight: usize,
    pub foreground: usize,
}

impl LabelCounts {
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Background => self.background,
            Label::Shadow => self.shadow,
            Label::Highlight => self.highlight,
            Label::Foreground => self.foreground,
        }
    }

    pub fn total(&self) -> usize {
        self.background + self.shadow + self.highlight + self.foreground
    }
}

/// Row-major label grid with the size of the classified image.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationMap {
    width: u32,
    height: u32,
    labels: Vec<Label>,
}

impl ClassificationMap {
    pub(crate) fn from_labels(width: u32, height: u32, labels: Vec<Label>) -> Self {
        debug_assert_eq!(labels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            labels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> Label {
        self.labels[y as usize * self.width as usize + x as usize]
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn counts(&self) -> LabelCounts {
        let mut counts = LabelCounts::default();
        for label in &self.labels {
            match label {
                Label::Background => counts.background += 1,
                Label::Shadow => counts.shadow += 1,
                Label::Highlight => counts.highlight += 1,
                Label::Foreground => counts.foreground += 1,
            }
        }
        counts
    }

    /// Grayscale image of raw label codes (1-4).
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| Luma([self.get(x, y).code()]))
    }
}
