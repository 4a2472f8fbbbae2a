use std::io;

use fromtemplate::error::Error;

#[test]
fn test_io_error_names_path() {
    let err = Error::io("out/util.py", io::Error::new(io::ErrorKind::NotFound, "file not found"));

    match &err {
        Error::IoError { path, source } => {
            assert_eq!(path, "out/util.py");
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        _ => panic!("Expected IoError variant"),
    }
    assert_eq!(err.to_string(), "IO error on 'out/util.py': file not found.");
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::InvalidDestinationError { destination: "Makefile".to_string() };
    assert_eq!(
        err.to_string(),
        "Makefile does not have a file suffix. You must provide the `--kind` argument."
    );

    let err = Error::InvalidKindError { destination: "util.py".to_string() };
    assert_eq!(
        err.to_string(),
        "Error generating util.py. The `--kind` argument must not be empty."
    );

    let err = Error::TemplateNotFoundError {
        destination: "util.py".to_string(),
        kind: "py".to_string(),
        template_path: "/t/py".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Error generating util.py. No template exists for kind `py` (looked in '/t/py')."
    );
}
