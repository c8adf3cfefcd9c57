//! JSON and YAML output formatters

use serde::Serialize;

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

/// Print a value as YAML
pub fn print_yaml<T: Serialize + ?Sized>(value: &T) {
    match serde_yml::to_string(value) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => eprintln!("Error serializing to YAML: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Theme {
        key: String,
        title: String,
    }

    #[test]
    fn test_yaml_serialization() {
        let themes = [Theme {
            key: "default".to_string(),
            title: "Default".to_string(),
        }];
        let yaml = serde_yml::to_string(&themes).unwrap();
        assert!(yaml.contains("key: default"));
        assert!(yaml.contains("title: Default"));
    }

    #[test]
    fn test_print_json_empty() {
        // Should not panic with empty input
        print_json::<[Theme]>(&[]);
    }
}
