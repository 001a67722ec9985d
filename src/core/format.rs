//! core::format
//!
//! Editor formatting settings carried by a project.
//!
//! The descriptor's `formatCodeOptions` mapping is overlaid on the defaults
//! key by key. Unknown keys and values of the wrong type are ignored so a
//! stale or hand-edited mapping never fails resolution.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Platform line ending.
pub const EOL: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Formatting settings for code in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatCodeOptions {
    pub indent_size: u32,
    pub tab_size: u32,
    pub new_line_character: String,
    pub convert_tabs_to_spaces: bool,
    pub insert_space_after_comma_delimiter: bool,
    pub insert_space_after_semicolon_in_for_statements: bool,
    pub insert_space_before_and_after_binary_operators: bool,
    pub insert_space_after_keywords_in_control_flow_statements: bool,
    pub insert_space_after_function_keyword_for_anonymous_functions: bool,
    pub insert_space_after_opening_and_before_closing_nonempty_parenthesis: bool,
    pub place_open_brace_on_new_line_for_functions: bool,
    pub place_open_brace_on_new_line_for_control_blocks: bool,
}

impl Default for FormatCodeOptions {
    fn default() -> Self {
        Self {
            indent_size: 4,
            tab_size: 4,
            new_line_character: EOL.to_string(),
            convert_tabs_to_spaces: true,
            insert_space_after_comma_delimiter: true,
            insert_space_after_semicolon_in_for_statements: true,
            insert_space_before_and_after_binary_operators: true,
            insert_space_after_keywords_in_control_flow_statements: true,
            insert_space_after_function_keyword_for_anonymous_functions: false,
            insert_space_after_opening_and_before_closing_nonempty_parenthesis: false,
            place_open_brace_on_new_line_for_functions: false,
            place_open_brace_on_new_line_for_control_blocks: false,
        }
    }
}

impl FormatCodeOptions {
    /// Build options from a descriptor's `formatCodeOptions` value.
    ///
    /// `None` or a non-object value yields the defaults.
    pub fn from_raw(raw: Option<&Value>) -> Self {
        let mut options = Self::default();
        let Some(Value::Object(map)) = raw else {
            return options;
        };

        for (key, value) in map {
            match (key.as_str(), value) {
                ("indentSize", Value::Number(n)) => {
                    if let Some(n) = n.as_u64().and_then(|n| u32::try_from(n).ok()) {
                        options.indent_size = n;
                    }
                }
                ("tabSize", Value::Number(n)) => {
                    if let Some(n) = n.as_u64().and_then(|n| u32::try_from(n).ok()) {
                        options.tab_size = n;
                    }
                }
                ("newLineCharacter", Value::String(s)) => options.new_line_character = s.clone(),
                (key, Value::Bool(b)) => {
                    if let Some(flag) = options.flag_mut(key) {
                        *flag = *b;
                    }
                }
                _ => {}
            }
        }

        options
    }

    fn flag_mut(&mut self, key: &str) -> Option<&mut bool> {
        let flag = match key {
            "convertTabsToSpaces" => &mut self.convert_tabs_to_spaces,
            "insertSpaceAfterCommaDelimiter" => &mut self.insert_space_after_comma_delimiter,
            "insertSpaceAfterSemicolonInForStatements" => {
                &mut self.insert_space_after_semicolon_in_for_statements
            }
            "insertSpaceBeforeAndAfterBinaryOperators" => {
                &mut self.insert_space_before_and_after_binary_operators
            }
            "insertSpaceAfterKeywordsInControlFlowStatements" => {
                &mut self.insert_space_after_keywords_in_control_flow_statements
            }
            "insertSpaceAfterFunctionKeywordForAnonymousFunctions" => {
                &mut self.insert_space_after_function_keyword_for_anonymous_functions
            }
            "insertSpaceAfterOpeningAndBeforeClosingNonemptyParenthesis" => {
                &mut self.insert_space_after_opening_and_before_closing_nonempty_parenthesis
            }
            "placeOpenBraceOnNewLineForFunctions" => {
                &mut self.place_open_brace_on_new_line_for_functions
            }
            "placeOpenBraceOnNewLineForControlBlocks" => {
                &mut self.place_open_brace_on_new_line_for_control_blocks
            }
            _ => return None,
        };
        Some(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_yields_defaults() {
        assert_eq!(FormatCodeOptions::from_raw(None), FormatCodeOptions::default());
        assert_eq!(
            FormatCodeOptions::from_raw(Some(&json!("nonsense"))),
            FormatCodeOptions::default()
        );
    }

    #[test]
    fn overlays_known_keys() {
        let raw = json!({
            "indentSize": 2,
            "tabSize": 8,
            "newLineCharacter": "\r\n",
            "convertTabsToSpaces": false,
            "placeOpenBraceOnNewLineForFunctions": true
        });
        let options = FormatCodeOptions::from_raw(Some(&raw));
        assert_eq!(options.indent_size, 2);
        assert_eq!(options.tab_size, 8);
        assert_eq!(options.new_line_character, "\r\n");
        assert!(!options.convert_tabs_to_spaces);
        assert!(options.place_open_brace_on_new_line_for_functions);
        assert!(options.insert_space_after_comma_delimiter);
    }

    #[test]
    fn ignores_unknown_and_mistyped() {
        let raw = json!({ "indentSize": "wide", "bogus": true, "tabSize": -1 });
        assert_eq!(FormatCodeOptions::from_raw(Some(&raw)), FormatCodeOptions::default());
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(FormatCodeOptions::default()).unwrap();
        assert_eq!(value["indentSize"], json!(4));
        assert_eq!(value["convertTabsToSpaces"], json!(true));
    }
}
