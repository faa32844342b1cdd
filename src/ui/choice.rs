use crate::error::PromptError;

/// Map a typed answer onto a position in an ordered option list.
///
/// Pure function, no I/O. The list is numbered from 1 as presented to
/// the user. `default_index` is consulted only for an empty answer and
/// must be in range when present; [`Ui::select`](crate::ui::Ui::select)
/// resolves it once per call by exact match against the entries.
pub fn resolve_choice(
    list: &[String],
    raw: &str,
    default_index: Option<usize>,
) -> Result<String, PromptError> {
    if raw.is_empty() {
        return match default_index {
            Some(index) => list.get(index).cloned().ok_or_else(|| {
                PromptError::Configuration(format!(
                    "default index {index} is outside the choice list"
                ))
            }),
            None => Err(PromptError::Empty),
        };
    }

    // Signed parse so "-1" is a number out of range, not a non-number.
    let n: i64 = raw.parse().map_err(|_| PromptError::NotNumber)?;
    if n < 1 || n > list.len() as i64 {
        return Err(PromptError::OutOfRange);
    }
    Ok(list[(n - 1) as usize].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> Vec<String> {
        vec!["A".to_string(), "B".to_string(), "C".to_string()]
    }

    #[test]
    fn test_every_in_range_number_resolves() {
        let list = list();
        for n in 1..=list.len() {
            let picked = resolve_choice(&list, &n.to_string(), None).unwrap();
            assert_eq!(picked, list[n - 1]);
        }
        // A default index never shadows an explicit answer.
        assert_eq!(resolve_choice(&list, "3", Some(0)).unwrap(), "C");
    }

    #[test]
    fn test_empty_answer_takes_default() {
        assert_eq!(resolve_choice(&list(), "", Some(1)).unwrap(), "B");
    }

    #[test]
    fn test_empty_answer_without_default_fails() {
        assert!(matches!(
            resolve_choice(&list(), "", None),
            Err(PromptError::Empty)
        ));
    }

    #[test]
    fn test_non_number_fails() {
        assert!(matches!(
            resolve_choice(&list(), "abc", None),
            Err(PromptError::NotNumber)
        ));
    }

    #[test]
    fn test_out_of_range_fails() {
        let list = list();
        for raw in ["0", "4", "-1", "100"] {
            assert!(
                matches!(resolve_choice(&list, raw, None), Err(PromptError::OutOfRange)),
                "expected {raw:?} to be out of range"
            );
        }
    }

    #[test]
    fn test_out_of_range_default_index_is_a_configuration_error() {
        assert!(matches!(
            resolve_choice(&list(), "", Some(9)),
            Err(PromptError::Configuration(_))
        ));
    }
}
