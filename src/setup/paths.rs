//! Path composition helper

use crate::error::{SwenvError, SwenvResult};
use std::path::{Path, PathBuf};

/// Join segments onto the first one with `Path::join` semantics.
///
/// An absolute later segment replaces what came before, exactly as
/// `Path::join` does; nothing is normalized.
pub fn path_join<I, P>(segments: I) -> SwenvResult<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut iter = segments.into_iter();
    let base = iter.next().ok_or(SwenvError::EmptyPath)?;
    Ok(iter.fold(base.as_ref().to_path_buf(), |acc, seg| acc.join(seg)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_in_order() {
        let joined = path_join(["a", "b", "c"]).unwrap();
        assert_eq!(joined, Path::new("a").join("b").join("c"));
    }

    #[test]
    fn single_segment_is_itself() {
        assert_eq!(path_join(["only"]).unwrap(), PathBuf::from("only"));
    }

    #[test]
    fn associative_over_prefix() {
        let ab = path_join(["a", "b"]).unwrap();
        let left = path_join([ab.as_path(), Path::new("c")]).unwrap();
        assert_eq!(left, path_join(["a", "b", "c"]).unwrap());
    }

    #[test]
    fn empty_sequence_fails() {
        let err = path_join(Vec::<&str>::new()).unwrap_err();
        assert!(matches!(err, SwenvError::EmptyPath));
    }
}
