use fscout::entry::FailureReason;
use fscout::walker::{search, SearchRequest};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn touch(path: &Path) {
    fs::write(path, b"x").expect("failed to create test file");
}

fn matched_paths(request: &SearchRequest) -> HashSet<PathBuf> {
    search(request)
        .expect("traversal should not fail")
        .matches
        .into_iter()
        .map(|m| m.path)
        .collect()
}

#[test]
fn empty_directory_yields_nothing() {
    let dir = TempDir::new().unwrap();
    let request = SearchRequest::new(dir.path(), "*");
    let outcome = search(&request).unwrap();
    assert_eq!(outcome.match_count(), 0);
    assert_eq!(outcome.failure_count(), 0);
}

#[test]
fn matching_is_case_insensitive_on_names() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("readme.TXT"));
    touch(&dir.path().join("report.txtx"));

    let request = SearchRequest::new(dir.path(), "*.txt");
    let paths = matched_paths(&request);
    assert_eq!(paths.len(), 1);
    assert!(paths.contains(&dir.path().join("readme.TXT")));
}

#[test]
fn question_mark_requires_exactly_one_character() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("abc"));
    touch(&dir.path().join("ac"));
    touch(&dir.path().join("abbc"));

    let request = SearchRequest::new(dir.path(), "a?c");
    let paths = matched_paths(&request);
    assert_eq!(paths.len(), 1);
    assert!(paths.contains(&dir.path().join("abc")));
}

#[test]
fn non_recursive_sees_only_direct_children() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("top.txt"));
    fs::create_dir(dir.path().join("sub")).unwrap();
    touch(&dir.path().join("sub/nested.txt"));

    let request = SearchRequest::new(dir.path(), "*.txt");
    let paths = matched_paths(&request);
    assert_eq!(paths.len(), 1);
    assert!(paths.contains(&dir.path().join("top.txt")));
}

#[test]
fn recursion_reaches_nested_matches() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
    touch(&dir.path().join("root.log"));
    touch(&dir.path().join("a/one.log"));
    touch(&dir.path().join("a/b/two.log"));
    touch(&dir.path().join("a/b/c/three.log"));
    touch(&dir.path().join("a/b/c/ignore.tmp"));

    let mut request = SearchRequest::new(dir.path(), "*.log");
    request.recurse = true;
    let paths = matched_paths(&request);
    assert_eq!(paths.len(), 4);
    assert!(paths.contains(&dir.path().join("a/b/c/three.log")));
}

#[test]
fn parallel_and_sequential_find_the_same_set() {
    let dir = TempDir::new().unwrap();
    for i in 0..6 {
        let branch = dir.path().join(format!("branch{i}"));
        fs::create_dir_all(branch.join("deeper")).unwrap();
        touch(&branch.join(format!("file{i}.dat")));
        touch(&branch.join("deeper").join(format!("deep{i}.dat")));
        touch(&branch.join("deeper").join("noise.txt"));
    }

    let mut sequential = SearchRequest::new(dir.path(), "*.dat");
    sequential.recurse = true;
    let mut parallel = sequential.clone();
    parallel.parallel = true;

    let sequential_paths = matched_paths(&sequential);
    let parallel_paths = matched_paths(&parallel);
    assert_eq!(sequential_paths.len(), 12);
    assert_eq!(sequential_paths, parallel_paths);
}

#[test]
fn missing_root_records_a_single_failure() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("missing");

    let request = SearchRequest::new(&gone, "*");
    let outcome = search(&request).unwrap();
    assert_eq!(outcome.match_count(), 0);
    assert_eq!(outcome.failure_count(), 1);
    assert_eq!(outcome.failures[0].path, gone);
    assert_eq!(outcome.failures[0].reason, FailureReason::NotFound);
}

#[test]
fn suppressed_missing_root_is_silent() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("missing");

    let mut request = SearchRequest::new(&gone, "*");
    request.suppress_errors = true;
    let outcome = search(&request).unwrap();
    assert_eq!(outcome.match_count(), 0);
    assert_eq!(outcome.failure_count(), 0);
}

#[test]
fn directories_match_only_when_requested_and_not_recursing() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("logs")).unwrap();
    touch(&dir.path().join("logs.txt"));

    // Plain non-recursive search never reports the directory.
    let request = SearchRequest::new(dir.path(), "logs*");
    let paths = matched_paths(&request);
    assert_eq!(paths.len(), 1);
    assert!(paths.contains(&dir.path().join("logs.txt")));

    // Opting in reports it, without a size.
    let mut with_dirs = SearchRequest::new(dir.path(), "logs*");
    with_dirs.include_dir_matches = true;
    let outcome = search(&with_dirs).unwrap();
    assert_eq!(outcome.match_count(), 2);
    let dir_match = outcome
        .matches
        .iter()
        .find(|m| m.is_directory)
        .expect("directory should match");
    assert_eq!(dir_match.size, None);

    // A directory queued for recursion is never pattern-tested.
    let mut recursing = SearchRequest::new(dir.path(), "logs*");
    recursing.include_dir_matches = true;
    recursing.recurse = true;
    let outcome = search(&recursing).unwrap();
    assert!(outcome.matches.iter().all(|m| !m.is_directory));
}

#[test]
fn hidden_directories_are_still_recursed() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".cache")).unwrap();
    touch(&dir.path().join(".cache/stash.log"));

    let mut request = SearchRequest::new(dir.path(), "*.log");
    request.recurse = true;
    let paths = matched_paths(&request);
    assert!(paths.contains(&dir.path().join(".cache/stash.log")));
}

#[test]
fn dot_entries_never_appear() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("plain.txt"));

    let mut request = SearchRequest::new(dir.path(), "*");
    request.recurse = true;
    request.include_dir_matches = true;
    let outcome = search(&request).unwrap();
    assert!(outcome.matches.iter().all(|m| m.name != "." && m.name != ".."));
}

#[test]
fn file_matches_carry_size_and_parent() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("blob.bin"), vec![0u8; 2048]).unwrap();

    let request = SearchRequest::new(dir.path(), "blob.bin");
    let outcome = search(&request).unwrap();
    assert_eq!(outcome.match_count(), 1);
    let m = &outcome.matches[0];
    assert_eq!(m.size, Some(2048));
    assert_eq!(m.parent, dir.path());
    assert_eq!(m.path, dir.path().join("blob.bin"));
    assert!(m.modified.is_some());
}

#[test]
fn concurrent_branches_merge_without_duplicates() {
    let dir = TempDir::new().unwrap();
    for b in 0..8 {
        let branch = dir.path().join(format!("b{b}"));
        fs::create_dir(&branch).unwrap();
        for f in 0..20 {
            touch(&branch.join(format!("f{f}.dat")));
        }
    }

    let mut request = SearchRequest::new(dir.path(), "*.dat");
    request.recurse = true;
    request.parallel = true;
    let outcome = search(&request).unwrap();

    let unique: HashSet<&PathBuf> = outcome.matches.iter().map(|m| &m.path).collect();
    assert_eq!(outcome.match_count(), 160);
    assert_eq!(unique.len(), 160, "no entry may appear twice");
}

// Regression guard for extended-length prefixing: nested directories that
// push well past the conventional 260-character ceiling must still
// enumerate.
#[cfg(windows)]
#[test]
fn paths_beyond_the_conventional_ceiling_still_enumerate() {
    use fscout::longpath;

    let dir = TempDir::new().unwrap();
    let mut deep = dir.path().to_path_buf();
    for _ in 0..12 {
        deep = deep.join("a-directory-segment-with-a-deliberately-long-name");
        // Creation itself needs the prefix once past the ceiling.
        fs::create_dir(longpath::for_enumeration(&deep)).unwrap();
    }
    assert!(deep.as_os_str().len() > 260);
    fs::write(longpath::for_enumeration(&deep).join("needle.txt"), b"x").unwrap();

    let mut request = SearchRequest::new(dir.path(), "needle.txt");
    request.recurse = true;
    let outcome = search(&request).unwrap();
    assert_eq!(outcome.match_count(), 1);
    assert_eq!(outcome.failure_count(), 0);
}
