use crate::MaskError;
use std::{fmt, num::NonZeroU8};

/// Foreground value written into masks, never zero (reserved for background)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "u8"))]
pub struct Label(NonZeroU8);

impl Label {
    pub const MAX: Label = Label(NonZeroU8::MAX);

    /// Validate label value, it must be in `1..=255`
    pub fn new(value: impl Into<i64>) -> Result<Self, MaskError> {
        let value = value.into();
        u8::try_from(value)
            .ok()
            .and_then(NonZeroU8::new)
            .map(Label)
            .ok_or(MaskError::InvalidLabel { value })
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0.get()
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<i64> for Label {
    type Error = MaskError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.get()
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({})", self.get())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Options controlling mask construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MaskOptions {
    /// Value of the interior and boundary pixels
    pub label: Label,
    /// Fill rows concurrently, only has an effect with the `parallel` feature
    pub parallel: bool,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            label: Label::default(),
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() -> Result<(), MaskError> {
        assert_eq!(Label::default().get(), 255);
        assert_eq!(Label::new(1)?.get(), 1);
        assert_eq!(u8::from(Label::new(200u8)?), 200);
        for value in [0i64, 256, -1] {
            match Label::new(value) {
                Err(MaskError::InvalidLabel { value: invalid }) => assert_eq!(invalid, value),
                result => panic!("unexpected result: {:?}", result),
            }
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_json() -> Result<(), MaskError> {
        let options: MaskOptions = serde_json::from_str(r#"{"label": 7}"#)?;
        assert_eq!(options.label, Label::new(7)?);
        assert!(options.parallel);

        let options: MaskOptions = serde_json::from_str(r#"{"parallel": false}"#)?;
        assert_eq!(options, MaskOptions {
            label: Label::MAX,
            parallel: false,
        });

        assert!(serde_json::from_str::<MaskOptions>(r#"{"label": 0}"#).is_err());
        assert!(serde_json::from_str::<MaskOptions>(r#"{"label": 300}"#).is_err());

        let text = serde_json::to_string(&MaskOptions::default())?;
        assert_eq!(text, r#"{"label":255,"parallel":true}"#);
        Ok(())
    }
}
