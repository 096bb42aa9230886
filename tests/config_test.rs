use officeflow::config::Config;

// Both cases live in one test: env vars are process-global and tests run in
// parallel threads.
#[test]
fn config_from_env() {
    unsafe {
        std::env::remove_var("OFFICEFLOW_DATA");
    }
    assert!(Config::from_env().is_err());

    unsafe {
        std::env::set_var("OFFICEFLOW_DATA", "   ");
    }
    assert!(Config::from_env().is_err());

    unsafe {
        std::env::set_var("OFFICEFLOW_DATA", "/var/lib/officeflow/data.json");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(
        config.data_path,
        std::path::PathBuf::from("/var/lib/officeflow/data.json")
    );
    assert!(!config.log_level.is_empty());

    unsafe {
        std::env::remove_var("OFFICEFLOW_DATA");
    }
}
