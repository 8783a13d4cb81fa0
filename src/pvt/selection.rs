use crate::error::AppError;

/// A selectable correlation for one calculator stage.
pub trait Correlation: Copy + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    fn name(self) -> &'static str;
}

/// Resolve a multi-choice selection to exactly one correlation.
///
/// An empty selection falls back to `fallback`; more than one distinct
/// choice is rejected instead of letting the last one win.
pub fn single_choice<C>(stage: &'static str, selected: &[C], fallback: C) -> Result<C, AppError>
where
    C: Correlation + PartialEq,
{
    let mut distinct: Vec<C> = Vec::with_capacity(selected.len());
    for c in selected {
        if !distinct.contains(c) {
            distinct.push(*c);
        }
    }
    match distinct.as_slice() {
        [] => Ok(fallback),
        [only] => Ok(*only),
        many => Err(AppError::AmbiguousSelection {
            stage,
            count: many.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Pick {
        A,
        B,
    }

    impl Correlation for Pick {
        const ALL: &'static [Self] = &[Pick::A, Pick::B];

        fn name(self) -> &'static str {
            match self {
                Pick::A => "A",
                Pick::B => "B",
            }
        }
    }

    #[test]
    fn empty_selection_uses_fallback() {
        assert_eq!(single_choice("stage", &[], Pick::B).unwrap(), Pick::B);
    }

    #[test]
    fn repeated_choice_is_not_ambiguous() {
        assert_eq!(single_choice("stage", &[Pick::A, Pick::A], Pick::B).unwrap(), Pick::A);
    }

    #[test]
    fn two_choices_are_rejected() {
        let err = single_choice("Bo above bubble point", Pick::ALL, Pick::A).unwrap_err();
        assert!(matches!(
            err,
            AppError::AmbiguousSelection {
                stage: "Bo above bubble point",
                count: 2
            }
        ));
    }
}
