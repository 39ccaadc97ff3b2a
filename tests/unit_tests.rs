use clap::{CommandFactory, Parser};
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use concat_yolo_datasets::labels::class_ids;
use concat_yolo_datasets::utils::{is_image_file, list_dataset_dirs, prefixed_name};
use concat_yolo_datasets::{relabel_line, rewrite_label_file, Args, LabelRewrite, SUBSET_NAMES};

#[test]
fn test_relabel_line_replaces_class_token() {
    assert_eq!(
        relabel_line("0 0.5 0.5 0.2 0.2\n", Some(3)),
        "3 0.5 0.5 0.2 0.2\n"
    );
    // Irregular spacing is normalized and a terminator is added
    assert_eq!(
        relabel_line("  12\t0.1  0.2 0.3 0.4", Some(0)),
        "0 0.1 0.2 0.3 0.4\n"
    );
}

#[test]
fn test_relabel_line_keeps_blank_lines_and_untargeted_lines() {
    assert!(matches!(relabel_line("   \n", Some(3)), Cow::Borrowed("   \n")));
    assert!(matches!(relabel_line("\r\n", Some(3)), Cow::Borrowed("\r\n")));
    assert!(matches!(
        relabel_line("1 0.1 0.1 0.1 0.1\r\n", None),
        Cow::Borrowed("1 0.1 0.1 0.1 0.1\r\n")
    ));
}

#[test]
fn test_rewrite_label_file_with_target_class() {
    let temp_dir = tempfile::tempdir().unwrap();
    let src = temp_dir.path().join("in.txt");
    let dst = temp_dir.path().join("out.txt");
    fs::write(&src, "0 0.5 0.5 0.2 0.2\n\n2 0.1 0.2 0.3 0.4").unwrap();

    let outcome = rewrite_label_file(&src, &dst, Some(7)).unwrap();

    assert_eq!(
        outcome,
        LabelRewrite {
            lines: 3,
            relabeled: 2
        }
    );
    assert_eq!(
        fs::read_to_string(&dst).unwrap(),
        "7 0.5 0.5 0.2 0.2\n\n7 0.1 0.2 0.3 0.4\n"
    );
}

#[test]
fn test_rewrite_label_file_without_target_class_is_identical() {
    let temp_dir = tempfile::tempdir().unwrap();
    let src = temp_dir.path().join("in.txt");
    let dst = temp_dir.path().join("out.txt");
    let content = "0 0.5 0.5 0.2 0.2\r\n  \n1  0.1 0.1 0.1 0.1";
    fs::write(&src, content).unwrap();

    let outcome = rewrite_label_file(&src, &dst, None).unwrap();

    assert_eq!(outcome.lines, 3);
    assert_eq!(outcome.relabeled, 0);
    assert_eq!(fs::read(&dst).unwrap(), content.as_bytes());
}

#[test]
fn test_rewrite_label_file_with_carriage_return_line_endings() {
    let temp_dir = tempfile::tempdir().unwrap();
    let src = temp_dir.path().join("in.txt");
    let dst = temp_dir.path().join("out.txt");
    fs::write(&src, "0 0.1 0.1 0.1 0.1\r1 0.2 0.2 0.2 0.2\r").unwrap();

    let outcome = rewrite_label_file(&src, &dst, Some(3)).unwrap();

    assert_eq!(
        outcome,
        LabelRewrite {
            lines: 2,
            relabeled: 2
        }
    );
    assert_eq!(
        fs::read_to_string(&dst).unwrap(),
        "3 0.1 0.1 0.1 0.1\n3 0.2 0.2 0.2 0.2\n"
    );
}

#[test]
fn test_rewrite_label_file_with_mixed_line_endings() {
    let temp_dir = tempfile::tempdir().unwrap();
    let src = temp_dir.path().join("in.txt");
    let dst = temp_dir.path().join("out.txt");
    fs::write(&src, "4 a b c d\r\n\r5 e f g h\n6 i j k l").unwrap();

    let outcome = rewrite_label_file(&src, &dst, Some(0)).unwrap();

    assert_eq!(outcome.lines, 4);
    assert_eq!(outcome.relabeled, 3);
    assert_eq!(
        fs::read_to_string(&dst).unwrap(),
        "0 a b c d\n\n0 e f g h\n0 i j k l\n"
    );
}

#[test]
fn test_rewrite_empty_label_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let src = temp_dir.path().join("in.txt");
    let dst = temp_dir.path().join("out.txt");
    fs::write(&src, "").unwrap();

    let outcome = rewrite_label_file(&src, &dst, Some(1)).unwrap();

    assert_eq!(outcome, LabelRewrite::default());
    assert!(dst.exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "");
}

#[test]
fn test_class_ids_skips_blank_lines() {
    let ids: Vec<_> = class_ids("0 0.1 0.1 0.1 0.1\n\n  \n2 0.3 0.3 0.1 0.1\r7 0 0 0 0").collect();
    assert_eq!(ids, vec!["0", "2", "7"]);
}

#[test]
fn test_prefixed_name() {
    assert_eq!(prefixed_name(0, "cat.jpg".as_ref()), "dataset0_cat.jpg");
    assert_eq!(prefixed_name(12, "a.b.txt".as_ref()), "dataset12_a.b.txt");
}

#[test]
fn test_is_image_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    for name in ["a.jpg", "b.jpeg", "c.png", "d.txt", "e.bmp", "noext", "f.JPG", "g.Png"] {
        fs::write(temp_dir.path().join(name), b"x").unwrap();
    }
    fs::create_dir(temp_dir.path().join("folder.jpg")).unwrap();

    assert!(is_image_file(&temp_dir.path().join("a.jpg")));
    assert!(is_image_file(&temp_dir.path().join("b.jpeg")));
    assert!(is_image_file(&temp_dir.path().join("c.png")));
    assert!(!is_image_file(&temp_dir.path().join("d.txt")));
    assert!(!is_image_file(&temp_dir.path().join("e.bmp")));
    assert!(!is_image_file(&temp_dir.path().join("noext")));
    assert!(!is_image_file(&temp_dir.path().join("folder.jpg")));
    assert!(!is_image_file(&temp_dir.path().join("f.JPG")));
    assert!(!is_image_file(&temp_dir.path().join("g.Png")));
}

#[test]
fn test_list_dataset_dirs_is_sorted_and_skips_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    for name in ["zeta", "alpha", "mid"] {
        fs::create_dir(temp_dir.path().join(name)).unwrap();
    }
    fs::write(temp_dir.path().join("readme.md"), b"notes").unwrap();

    let dirs: Vec<PathBuf> = list_dataset_dirs(temp_dir.path()).unwrap();
    let names: Vec<_> = dirs
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_args_defaults() {
    let args = Args::try_parse_from(["concat-yolo-datasets", "--root_dir", "in", "--output", "out"])
        .unwrap();

    assert_eq!(args.root_dir, PathBuf::from("in"));
    assert_eq!(args.output, PathBuf::from("out"));
    assert_eq!(args.target_class, None);
    assert_eq!(args.subsets, SUBSET_NAMES);
    assert_eq!(args.log_file, PathBuf::from("concat_yolo_datasets.log"));
    assert!(args.stats_json.is_none());
    assert!(!args.no_progress);
}

#[test]
fn test_args_target_class_and_subsets() {
    let args = Args::try_parse_from([
        "concat-yolo-datasets",
        "--root_dir",
        "in",
        "--output",
        "out",
        "--target_class",
        "3",
        "--subsets",
        "train,test",
    ])
    .unwrap();

    assert_eq!(args.target_class, Some(3));
    assert_eq!(args.subsets, vec!["train", "test"]);
}

#[test]
fn test_args_rejects_invalid_values() {
    assert!(Args::try_parse_from(["concat-yolo-datasets", "--root_dir", "in"]).is_err());
    assert!(Args::try_parse_from([
        "concat-yolo-datasets",
        "--root_dir",
        "in",
        "--output",
        "out",
        "--target_class",
        "-1",
    ])
    .is_err());
    assert!(Args::try_parse_from([
        "concat-yolo-datasets",
        "--root_dir",
        "in",
        "--output",
        "out",
        "--subsets",
        "../escape",
    ])
    .is_err());
}

#[test]
fn test_help_states_target_class_is_non_negative() {
    let help = Args::command().render_long_help().to_string();
    assert!(help.contains("--target_class"));
    assert!(help.contains("Non-negative class id"));
}
