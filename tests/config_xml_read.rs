use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use post_finalize::config::{EXT_CLEANUP_DEFAULT, load_config_from_xml_path, validate_and_normalize};
use post_finalize::{Config, FinalizeError, LogLevel};

#[test]
fn reads_all_fields() {
    let td = tempdir().unwrap();
    let p = td.path().join("config.xml");
    fs::write(
        &p,
        r#"<config>
  <dest_base>/srv/complete</dest_base>
  <ext_cleanup>.nfo, .url</ext_cleanup>
  <log_level>quiet</log_level>
  <log_file>/var/log/pf.log</log_file>
</config>"#,
    )
    .unwrap();

    let cfg = load_config_from_xml_path(&p).unwrap();
    assert_eq!(cfg.dest_base, Some(PathBuf::from("/srv/complete")));
    assert_eq!(cfg.ext_cleanup, ".nfo, .url");
    assert_eq!(cfg.log_level, LogLevel::Quiet);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/var/log/pf.log")));
}

#[test]
fn missing_elements_keep_defaults() {
    let td = tempdir().unwrap();
    let p = td.path().join("config.xml");
    fs::write(&p, "<config></config>").unwrap();

    let cfg = load_config_from_xml_path(&p).unwrap();
    assert_eq!(cfg.dest_base, None);
    assert_eq!(cfg.ext_cleanup, EXT_CLEANUP_DEFAULT);
    assert_eq!(cfg.log_level, LogLevel::Normal);
    assert_eq!(cfg.log_file, None);
}

#[test]
fn empty_cleanup_list_disables_cleanup() {
    let td = tempdir().unwrap();
    let p = td.path().join("config.xml");
    fs::write(&p, "<config><ext_cleanup></ext_cleanup></config>").unwrap();

    let cfg = load_config_from_xml_path(&p).unwrap();
    assert!(cfg.cleanup_list().is_empty());
}

#[test]
fn malformed_xml_is_an_error() {
    let td = tempdir().unwrap();
    let p = td.path().join("config.xml");
    fs::write(&p, "<config><dest_base>/x</config>").unwrap();
    assert!(load_config_from_xml_path(&p).is_err());
}

#[test]
fn validation_creates_and_canonicalizes_dest_base() {
    let td = tempdir().unwrap();
    let base = td.path().join("nested").join("complete");
    let mut cfg = Config::new(&base);
    validate_and_normalize(&mut cfg).unwrap();

    let real = cfg.dest_base.unwrap();
    assert!(real.is_dir());
    assert!(real.is_absolute());
    assert_eq!(real.file_name().unwrap(), "complete");
}

#[test]
fn validation_rejects_file_as_dest_base() {
    let td = tempdir().unwrap();
    let file = td.path().join("not-a-dir");
    fs::write(&file, "x").unwrap();

    let err = validate_and_normalize(&mut Config::new(&file)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinalizeError>(),
        Some(FinalizeError::NotADirectory(_))
    ));
}

#[test]
fn validation_rejects_catch_all_cleanup_tokens() {
    let mut cfg = Config::default();
    cfg.ext_cleanup = ".nfo; *.*".to_string();
    let err = validate_and_normalize(&mut cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinalizeError>(),
        Some(FinalizeError::InvalidConfig { field: "ext_cleanup", .. })
    ));
}

#[test]
fn validation_rejects_malformed_cleanup_mask() {
    let mut cfg = Config::default();
    cfg.ext_cleanup = ".nfo, *[sample".to_string();
    let err = validate_and_normalize(&mut cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FinalizeError>(),
        Some(FinalizeError::InvalidConfig { field: "ext_cleanup", .. })
    ));
}
