//! Floating badge surface state

use crate::messaging::AnalysisData;

/// Model identifier the vendor wheel widget expects in `data-model`
pub const WIDGET_MODEL: &str = "aurora-sdg-multi";

/// Default wheel height passed to the vendor widget
pub const WHEEL_HEIGHT: u32 = 280;

/// Attribute contract of the vendor rendering widget.
///
/// The widget consumes a DOM element tagged with `data-text`, `data-model`
/// and `data-wheel-height` plus an attached result object, and must be
/// re-invoked after the element is added dynamically; all this system owes
/// it is the attributes and the result shape.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelFrame {
    pub text: String,
    pub model: String,
    pub wheel_height: u32,
    pub result: crate::classifier::ClassificationResult,
}

impl WheelFrame {
    pub fn new(data: &AnalysisData) -> Self {
        Self {
            text: data.text.clone(),
            model: WIDGET_MODEL.to_string(),
            wheel_height: WHEEL_HEIGHT,
            result: data.result.clone(),
        }
    }

    /// The `data-*` attributes to set before the widget script runs
    pub fn attributes(&self) -> [(&'static str, String); 3] {
        [
            ("data-text", self.text.clone()),
            ("data-model", self.model.clone()),
            ("data-wheel-height", self.wheel_height.to_string()),
        ]
    }
}

/// What the badge is currently presenting
#[derive(Debug, Clone, PartialEq)]
pub enum BadgeContent {
    /// Analysis in flight
    Loading,
    /// Rendered classification wheel
    Wheel(WheelFrame),
    /// Successful classification with zero predictions
    NoClassification,
    /// User-visible error text
    Error(String),
}

/// The floating badge injected into the page.
///
/// Created lazily on first activation; deactivation hides it rather than
/// destroying it so the last-rendered content survives the next show.
#[derive(Debug)]
pub struct FloatingBadge {
    size: u32,
    visible: bool,
    content: BadgeContent,
}

impl FloatingBadge {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            visible: true,
            content: BadgeContent::Loading,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn resize(&mut self, size: u32) {
        self.size = size;
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn show_loading(&mut self) {
        self.content = BadgeContent::Loading;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.content = BadgeContent::Error(message.into());
    }

    /// Render a classification, or the no-classification state for an empty
    /// prediction set
    pub fn render(&mut self, data: &AnalysisData) {
        self.content = if data.result.is_empty() {
            BadgeContent::NoClassification
        } else {
            BadgeContent::Wheel(WheelFrame::new(data))
        };
    }

    pub fn content(&self) -> &BadgeContent {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassificationResult, Prediction};

    fn analysis(scores: &[f64]) -> AnalysisData {
        AnalysisData {
            text: "sample text".to_string(),
            result: ClassificationResult {
                predictions: scores
                    .iter()
                    .enumerate()
                    .map(|(i, &score)| Prediction {
                        code: (i + 1) as u8,
                        name: crate::classifier::goal_name((i + 1) as u8)
                            .unwrap()
                            .to_string(),
                        score,
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn test_render_builds_wheel_frame() {
        let mut badge = FloatingBadge::new(250);
        badge.render(&analysis(&[0.2, 0.8]));

        match badge.content() {
            BadgeContent::Wheel(frame) => {
                assert_eq!(frame.model, WIDGET_MODEL);
                assert_eq!(frame.text, "sample text");
                assert_eq!(frame.result.top().unwrap().code, 2);

                let attrs = frame.attributes();
                assert_eq!(attrs[0], ("data-text", "sample text".to_string()));
                assert_eq!(attrs[1], ("data-model", "aurora-sdg-multi".to_string()));
            }
            other => panic!("expected wheel content, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_result_renders_no_classification() {
        let mut badge = FloatingBadge::new(250);
        badge.render(&analysis(&[]));
        assert_eq!(badge.content(), &BadgeContent::NoClassification);
    }

    #[test]
    fn test_hide_preserves_content() {
        let mut badge = FloatingBadge::new(250);
        badge.render(&analysis(&[0.5]));
        let before = badge.content().clone();

        badge.hide();
        assert!(!badge.is_visible());
        assert_eq!(badge.content(), &before);

        badge.show();
        assert!(badge.is_visible());
        assert_eq!(badge.content(), &before);
    }

    #[test]
    fn test_resize() {
        let mut badge = FloatingBadge::new(250);
        badge.resize(400);
        assert_eq!(badge.size(), 400);
    }
}
