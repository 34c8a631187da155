//! End-to-end lifecycle across the workspace crates
//!
//! Config loading -> editing project files with the database hook ->
//! installing on a second database -> updating with deletion markers.

use pip_core::{
    EntryKind, EntryReconciler, FieldMapping, InstallAction, MultiDocumentReconciler,
    PipDatabaseSync, PipEntryKind, PipFormValidator, PipRow, ProjectXml,
};
use pip_fs::NormalizedPath;
use pip_meta::{InstallerConfig, PluginImplementation, PluginRegistry};
use pip_test_utils::TestProject;
use pip_test_utils::xml::{core_class, pip_document};
use pretty_assertions::assert_eq;
use rusqlite::Connection;

const VENDOR_PLUGIN: &str = "vendor\\system\\package\\plugin\\FooPackageInstallationPlugin";

fn setup() -> (TestProject, InstallerConfig, NormalizedPath) {
    let project = TestProject::new().with_config(5, "com.example.addon", &["xml/a.xml", "./xml/b.xml"]);
    let mut config_text = project.read_file("pipsync.toml");
    config_text.push_str(&format!("\n[[plugins]]\nclass_name = \"{}\"\n", VENDOR_PLUGIN.replace('\\', "\\\\")));
    project.write_file("pipsync.toml", &config_text);

    let config_path = NormalizedPath::new(project.config_path());
    let config = InstallerConfig::load(&config_path).unwrap();
    let base_dir = config_path.parent().unwrap();
    (project, config, base_dir)
}

fn registry(config: &InstallerConfig) -> PluginRegistry {
    let mut registry = PluginRegistry::with_builtins();
    for declaration in &config.plugins {
        registry.register(PluginImplementation::from(declaration));
    }
    registry
}

fn fields(name: &str, class_name: &str) -> FieldMapping {
    FieldMapping::new()
        .with("pluginName", name)
        .with("className", class_name)
}

#[test]
fn test_config_resolves_project_and_database_paths() {
    let (project, config, base_dir) = setup();

    let paths = config.project_paths(&base_dir);
    assert_eq!(paths.len(), 2);
    assert!(paths[0].as_str().ends_with("/xml/a.xml"));
    assert!(paths[1].as_str().ends_with("/xml/b.xml"));
    assert!(!paths[1].as_str().contains("/./"));
    assert_eq!(
        config.database_path(&base_dir).to_native(),
        project.path("pipsync.db")
    );
    assert!(registry(&config).contains(VENDOR_PLUGIN));
}

#[test]
fn test_edit_session_then_install_elsewhere() {
    let (project, config, base_dir) = setup();
    let kind = PipEntryKind::new(&config.package);
    let registry = registry(&config);

    let development = Connection::open(config.database_path(&base_dir).to_native()).unwrap();
    let mut sync = PipDatabaseSync::new(&development, config.package.clone(), &config.database.table_prefix).unwrap();
    sync.ensure_schema().unwrap();

    let projects = config
        .project_paths(&base_dir)
        .iter()
        .map(|p| ProjectXml::load_or_create(p, &kind).unwrap())
        .collect();
    let mut reconciler = MultiDocumentReconciler::new(kind, &mut sync, projects).unwrap();

    // add two plugins, validated like the form would
    for (name, class_name) in [("foo", VENDOR_PLUGIN.to_string()), ("option", core_class("Option"))] {
        let taken: Vec<String> = reconciler
            .entry_list(&kind.entry_list_keys())
            .identifiers()
            .map(str::to_string)
            .collect();
        let submitted = fields(name, &class_name);
        PipFormValidator::new(&registry, taken).validate(&submitted).unwrap();
        reconciler.add_entry(&submitted).unwrap();
    }

    // rename one, drop the other
    reconciler.set_edited_entry_identifier("foo").unwrap();
    let outcome = reconciler
        .edit_entry(&fields("fooBar", VENDOR_PLUGIN), "foo")
        .unwrap();
    assert_eq!(outcome.identifier, "fooBar");
    assert!(!outcome.partial);
    reconciler.delete_entry("option").unwrap();
    drop(reconciler);

    let expected = pip_document(&[("fooBar", VENDOR_PLUGIN)], &["option"]);
    assert_eq!(project.read_file("xml/a.xml"), expected);
    assert_eq!(project.read_file("xml/b.xml"), expected);
    project.assert_no_temp_files();

    let expected_row = PipRow {
        plugin_name: "fooBar".to_string(),
        package_id: 5,
        priority: 0,
        class_name: VENDOR_PLUGIN.to_string(),
    };
    assert_eq!(sync.rows().unwrap(), vec![expected_row.clone()]);

    // a system that installed the old state picks up the changes on update
    let production = Connection::open_in_memory().unwrap();
    let remote = PipDatabaseSync::new(&production, config.package.clone(), "wcf1_").unwrap();
    remote.ensure_schema().unwrap();
    let old = pip_xml::XmlDocument::parse(&pip_document(
        &[("foo", VENDOR_PLUGIN), ("option", "x")],
        &[],
    ))
    .unwrap();
    remote.install(&old, InstallAction::Install).unwrap();

    let current = ProjectXml::load(&NormalizedPath::new(project.path("xml/a.xml"))).unwrap();
    let report = remote.install(current.document(), InstallAction::Update).unwrap();

    assert_eq!(report.deleted, 1);
    assert_eq!(report.imported, 1);
    let names: Vec<_> = remote.rows().unwrap().into_iter().map(|r| r.plugin_name).collect();
    assert_eq!(names, vec!["foo", "fooBar"]);
}

#[test]
fn test_entry_list_serializes_for_scripts() {
    let (project, config, base_dir) = setup();
    project.write_file("xml/a.xml", &pip_document(&[("foo", VENDOR_PLUGIN)], &[]));
    project.write_file("xml/b.xml", &pip_document(&[("bar", "B"), ("foo", "other")], &[]));
    let kind = PipEntryKind::new(&config.package);

    let projects = config
        .project_paths(&base_dir)
        .iter()
        .map(|p| ProjectXml::load(p).unwrap())
        .collect();
    let reconciler = MultiDocumentReconciler::new(kind, pip_core::NoopHook, projects).unwrap();
    let list = reconciler.entry_list(&kind.entry_list_keys());

    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(json["entries"].as_array().unwrap().len(), 2);
    assert_eq!(json["entries"][0]["identifier"], "foo");
    assert_eq!(json["entries"][0]["fields"]["className"], VENDOR_PLUGIN);
    assert_eq!(json["entries"][1]["identifier"], "bar");
}
