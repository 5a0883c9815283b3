//! End-to-end runs of the backup pipeline against a mocked post source.

use std::fs;

use postbak::access::can_access_team;
use postbak::backup::{run_backup, BackupError};
use postbak::contract::{MockPostSource, PostPage, PostRecord, SourceError, Team};
use postbak::materialize::INDEX_FILE;
use postbak::paginate::for_each_post;
use tempfile::tempdir;

fn team(name: &str) -> Team {
    Team {
        name: name.to_string(),
    }
}

fn post(full_path: &str, body: &str) -> PostRecord {
    PostRecord {
        full_path: full_path.to_string(),
        body: body.to_string(),
    }
}

fn page_of(posts: Vec<PostRecord>, next_page: Option<u32>) -> PostPage {
    PostPage { posts, next_page }
}

#[tokio::test]
async fn three_pages_are_visited_once_each_in_order() {
    let mut source = MockPostSource::new();
    source.expect_list_posts().times(3).returning(|_, page| {
        Ok(match page {
            1 => page_of(vec![post("p/one", "1"), post("p/two", "2")], Some(2)),
            2 => page_of(vec![post("p/three", "3")], Some(3)),
            3 => page_of(vec![post("p/four", "4")], None),
            other => panic!("unexpected page requested: {other}"),
        })
    });

    let mut visited = Vec::new();
    for_each_post(&source, "ops", |p| {
        visited.push(p.full_path);
        Ok(())
    })
    .await
    .expect("pagination should complete");

    assert_eq!(visited, vec!["p/one", "p/two", "p/three", "p/four"]);
}

#[tokio::test]
async fn inaccessible_team_aborts_before_any_post_is_fetched() {
    let root = tempdir().expect("temp dir");
    let mut source = MockPostSource::new();
    source
        .expect_list_teams()
        .times(1)
        .returning(|| Ok(vec![team("someone-else")]));
    // No list_posts expectation: any call would fail the test.

    let err = run_backup(&source, "ops", root.path()).await.unwrap_err();
    assert!(
        matches!(err, BackupError::TeamNotAccessible(ref t) if t == "ops"),
        "expected TeamNotAccessible, got: {err:?}"
    );
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn team_match_is_case_sensitive_and_exact() {
    let mut source = MockPostSource::new();
    source
        .expect_list_teams()
        .returning(|| Ok(vec![team("Ops"), team("ops-archive")]));

    assert!(!can_access_team(&source, "ops").await.unwrap());
    assert!(can_access_team(&source, "Ops").await.unwrap());
}

#[tokio::test]
async fn empty_source_completes_without_writing_anything() {
    let root = tempdir().expect("temp dir");
    let mut source = MockPostSource::new();
    source
        .expect_list_teams()
        .returning(|| Ok(vec![team("ops")]));
    source
        .expect_list_posts()
        .times(1)
        .returning(|_, _| Ok(page_of(vec![], None)));

    let report = run_backup(&source, "ops", root.path())
        .await
        .expect("empty run should succeed");

    assert_eq!(report.posts_written, 0);
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn colliding_posts_across_pages_produce_the_readme_tree() {
    let root = tempdir().expect("temp dir");
    let mut source = MockPostSource::new();
    source
        .expect_list_teams()
        .returning(|| Ok(vec![team("ops")]));
    source.expect_list_posts().returning(|_, page| {
        Ok(match page {
            1 => page_of(vec![post("notes/a", "body of a")], Some(2)),
            _ => page_of(vec![post("notes/a/b", "body of b")], None),
        })
    });

    let report = run_backup(&source, "ops", root.path()).await.unwrap();
    assert_eq!(report.posts_written, 2);
    assert_eq!(
        fs::read_to_string(root.path().join("notes/a").join(INDEX_FILE)).unwrap(),
        "body of a"
    );
    assert_eq!(
        fs::read_to_string(root.path().join("notes/a/b")).unwrap(),
        "body of b"
    );
}

#[tokio::test]
async fn fetch_failure_mid_run_keeps_earlier_posts_on_disk() {
    let root = tempdir().expect("temp dir");
    let mut source = MockPostSource::new();
    source
        .expect_list_teams()
        .returning(|| Ok(vec![team("ops")]));
    source.expect_list_posts().returning(|_, page| match page {
        1 => Ok(page_of(vec![post("kept/post", "still here")], Some(2))),
        _ => Err(SourceError::Status {
            url: "https://api.example.test/v1/teams/ops/posts".to_string(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        }),
    });

    let err = run_backup(&source, "ops", root.path()).await.unwrap_err();
    assert!(
        matches!(err, BackupError::Source(_)),
        "expected Source error, got: {err:?}"
    );
    assert_eq!(
        fs::read_to_string(root.path().join("kept/post")).unwrap(),
        "still here"
    );
}

#[tokio::test]
async fn duplicate_collision_surfaces_as_a_materialize_fault() {
    let root = tempdir().expect("temp dir");
    let mut source = MockPostSource::new();
    source
        .expect_list_teams()
        .returning(|| Ok(vec![team("ops")]));
    source.expect_list_posts().times(1).returning(|_, _| {
        Ok(page_of(
            vec![
                post("docs/guide/README", "explicit readme post"),
                post("docs/guide", "directory post"),
            ],
            None,
        ))
    });

    let err = run_backup(&source, "ops", root.path()).await.unwrap_err();
    assert!(
        matches!(err, BackupError::Materialize(_)),
        "expected Materialize fault, got: {err:?}"
    );
}
