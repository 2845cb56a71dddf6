//! Application info served by `/api/hello`

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HelloResponse {
    #[serde(rename = "App Name", default)]
    pub app_name: Option<String>,
    #[serde(rename = "Version", default)]
    pub version: Option<String>,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced_field_names() {
        let hello: HelloResponse = serde_json::from_str(
            r#"{"App Name": "mini-rag", "Version": "0.1", "Message": "Welcome"}"#,
        )
        .unwrap();
        assert_eq!(hello.app_name.as_deref(), Some("mini-rag"));
        assert_eq!(hello.version.as_deref(), Some("0.1"));
        assert_eq!(hello.message.as_deref(), Some("Welcome"));
    }
}
