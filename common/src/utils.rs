use std::path::PathBuf;

/// Searches all ancestor directories of the current working directory and of
/// the current executable (including themselves) for a file or directory
/// whose name starts with `name`.
/// If found, returns the path to it.
pub fn search_current_ancestor_dirs_for(name: &str) -> Option<PathBuf> {
    [
        std::env::current_dir().as_ref(),
        std::env::current_exe().as_ref(),
    ]
    .iter()
    .filter_map(|p| p.ok())
    .flat_map(|p| p.ancestors())
    .find_map(|p| {
        p.read_dir()
            .ok()?
            .filter_map(|e| e.ok())
            .find(|e| e.file_name().to_str().is_some_and(|n| n.starts_with(name)))
            .map(|e| e.path())
    })
}

/// Concatenates a namespace and a name into the key used in a flat,
/// process-wide symbol table.
pub fn qualified_name(namespace: &str, name: &str) -> String {
    let mut qualified = String::with_capacity(namespace.len() + name.len());
    qualified.push_str(namespace);
    qualified.push_str(name);
    qualified
}

#[cfg(feature = "unsafe_wrappers")]
mod unsafe_wrappers {
    use derive_more as dm;

    /// Marks a value as sendable across threads.
    /// The user is responsible for serializing every access to the wrapped value.
    #[derive(Debug, Default, Clone, Copy, dm::Deref, dm::DerefMut)]
    pub struct UnsafeSend<T>(T);

    impl<T> UnsafeSend<T> {
        pub const fn new(value: T) -> Self {
            Self(value)
        }

        pub fn into_inner(self) -> T {
            self.0
        }
    }

    unsafe impl<T> Send for UnsafeSend<T> {}
}
#[cfg(feature = "unsafe_wrappers")]
pub use unsafe_wrappers::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_is_plain_concatenation() {
        assert_eq!(qualified_name("x__", "hello"), "x__hello");
        assert_eq!(qualified_name("", "z"), "z");
    }

    #[test]
    fn missing_entries_are_not_found() {
        assert!(search_current_ancestor_dirs_for("ryices_surely_missing_entry_0d9c1").is_none());
    }
}
