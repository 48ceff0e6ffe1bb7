//! Mapping between issues and database page properties
//!
//! | Issue   | Property | Notion type  |
//! |---------|----------|--------------|
//! | title   | `Name`   | title        |
//! | url     | `URL`    | url          |
//! | state   | `State`  | select       |
//! | id      | `ID`     | number       |
//! | labels  | `Label`  | multi_select |

use serde_json::{json, Value};

use crate::domain::entities::{IssueRecord, IssueState};
use crate::domain::ports::{
    MultiSelectProperty, NumberProperty, PageProperties, RichText, SelectOption, SelectProperty,
    TextContent, TitleProperty, UrlProperty,
};

/// Property the sync matches records on
pub const ID_PROPERTY: &str = "ID";

impl From<&IssueRecord> for PageProperties {
    fn from(issue: &IssueRecord) -> Self {
        PageProperties {
            name: TitleProperty {
                title: vec![RichText {
                    kind: "text".to_string(),
                    text: TextContent {
                        content: issue.title().to_string(),
                    },
                }],
            },
            // Notion rejects "" for url properties, null clears them
            url: UrlProperty {
                url: Some(issue.url().to_string()).filter(|u| !u.is_empty()),
            },
            state: SelectProperty {
                select: Some(SelectOption {
                    name: issue.state().to_string(),
                }),
            },
            id: NumberProperty {
                number: Some(issue.id()),
            },
            label: MultiSelectProperty {
                multi_select: issue
                    .labels()
                    .iter()
                    .map(|name| SelectOption { name: name.clone() })
                    .collect(),
            },
        }
    }
}

impl From<&PageProperties> for IssueRecord {
    fn from(props: &PageProperties) -> Self {
        let title: String = props
            .name
            .title
            .iter()
            .map(|segment| segment.text.content.as_str())
            .collect();

        IssueRecord::new(
            props.id.number.unwrap_or_default(),
            title,
            props.url.url.clone().unwrap_or_default(),
            props
                .state
                .select
                .as_ref()
                .and_then(|s| s.name.parse::<IssueState>().ok())
                .unwrap_or_default(),
            props.label.multi_select.iter().map(|o| o.name.clone()),
        )
    }
}

/// Query filter matching the record of one issue
pub fn id_filter(id: i64) -> Value {
    json!({
        "property": ID_PROPERTY,
        "number": { "equals": id }
    })
}

/// Property schema declared on setup. `Name` is the database's title
/// property and always exists, so it is not declared here.
pub fn database_schema() -> Value {
    json!({
        "ID": { "number": {} },
        "State": {
            "select": {
                "options": [
                    { "name": "open", "color": "green" },
                    { "name": "close", "color": "red" }
                ]
            }
        },
        "URL": { "url": {} },
        "Label": { "multi_select": {} }
    })
}
