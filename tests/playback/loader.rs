use beatmap_rs::{
    convert::ConvertError,
    loader::{LoadError, spawn_conversion},
};
use pretty_assertions::assert_eq;

#[test]
fn test_background_conversion() {
    let task = spawn_conversion(include_bytes!("../files/legacy_expert.dat").to_vec());
    let output = task.wait().expect("must be converted");
    assert_eq!(output.difficulty.notes.len(), 3);
    assert_eq!(output.warnings.len(), 3);
}

#[test]
fn test_background_conversion_errors() {
    let task = spawn_conversion(br#"{"version":"4.0.0"}"#.to_vec());
    assert_eq!(
        task.wait(),
        Err(LoadError::Convert(ConvertError::UnsupportedVersion(
            "4.0.0".to_string()
        )))
    );
}

#[test]
fn test_polling_until_ready() {
    let mut task = spawn_conversion(include_bytes!("../files/current_expert.dat").to_vec());
    let result = loop {
        if let Some(result) = task.try_take() {
            break result;
        }
        std::thread::yield_now();
    };
    assert_eq!(result.map(|o| o.difficulty.notes.len()), Ok(3));
    assert!(task.try_take().is_none());
}
