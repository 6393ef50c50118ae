//! Webex message payload construction.
//!
//! A message carries two renderings of the same event: a markdown blockquote
//! for clients without card support, and an Adaptive Card attachment. Both
//! include the execution time, check output, and history sections only while
//! the check is failing; a resolved event omits them entirely.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::history::sorted_status_history;
use crate::presentation::{minify_whitespace, StatusPresentation};
use crate::validate::ValidEvent;

/// Base URL of the bucket holding the status stripe images.
pub const STATIC_IMAGE_BUCKET: &str =
    "https://webex-teams-static-image-store.s3.us-east-2.amazonaws.com";

const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// Rendered message body for `POST /v1/messages`.
///
/// Exactly one of `room_id` / `to_person_email` is set; the other is skipped
/// during serialization.
#[derive(Debug, Serialize)]
pub struct MessagePayload {
    #[serde(rename = "roomId", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(rename = "toPersonEmail", skip_serializing_if = "Option::is_none")]
    pub to_person_email: Option<String>,
    pub markdown: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Serialize)]
pub struct Attachment {
    #[serde(rename = "contentType")]
    pub content_type: &'static str,
    pub content: Value,
}

/// Sections present only while the check is failing.
#[derive(Debug)]
enum CardDetail {
    Resolved,
    Unresolved {
        execution_time: String,
        output: String,
        history: Vec<String>,
    },
}

const MARKDOWN_HEADER: &str = r"
    <blockquote class='{{color}}'>
      {{icon}} {{label}} <br/>
      <b>Check Name:</b> {{check_name}}
";
const MARKDOWN_EXECUTION: &str = r"
      &nbsp;&nbsp;&nbsp;&nbsp; <b>Execution Time:</b> {{execution_time}} <br/>
";
const MARKDOWN_ENTITY: &str = r"
      <b>Entity:</b> {{entity_name}} <br/>
";
const MARKDOWN_DETAIL: &str = r"
      <b>Check output:</b> {{output}} <br/>
      <b>History:</b> {{history}} <br/>
";
const MARKDOWN_FOOTER: &str = "</blockquote>";

/// Builds the message payload for a validated event.
///
/// A `room_id` containing `@` is treated as a person's email address and the
/// message is sent directly instead of to a room.
pub fn render_message(event: &ValidEvent<'_>, room_id: &str) -> MessagePayload {
    let presentation = StatusPresentation::for_status(event.check.status);
    let detail = if presentation.is_resolved() {
        CardDetail::Resolved
    } else {
        CardDetail::Unresolved {
            execution_time: format_execution_time(event.check.executed),
            output: strip_trailing_newline(&event.check.output).to_string(),
            history: sorted_status_history(event.check),
        }
    };

    let (room, person) = if room_id.contains('@') {
        (None, Some(room_id.to_string()))
    } else {
        (Some(room_id.to_string()), None)
    };

    MessagePayload {
        room_id: room,
        to_person_email: person,
        markdown: render_markdown(event, &presentation, &detail),
        attachments: vec![Attachment {
            content_type: ADAPTIVE_CARD_CONTENT_TYPE,
            content: adaptive_card(event, &presentation, &detail),
        }],
    }
}

/// Minifies the template skeleton, then substitutes values. The skeleton is
/// whitespace-collapsed before any event data enters it, so output newlines
/// survive into the rendered text.
fn render_markdown(
    event: &ValidEvent<'_>,
    presentation: &StatusPresentation,
    detail: &CardDetail,
) -> String {
    let unresolved = matches!(detail, CardDetail::Unresolved { .. });

    let mut template = String::from(MARKDOWN_HEADER);
    if unresolved {
        template.push_str(MARKDOWN_EXECUTION);
    }
    template.push_str(MARKDOWN_ENTITY);
    if unresolved {
        template.push_str(MARKDOWN_DETAIL);
    }
    template.push_str(MARKDOWN_FOOTER);

    let mut markdown = minify_whitespace(&template)
        .replace("{{color}}", presentation.color)
        .replace("{{icon}}", presentation.icon)
        .replace("{{label}}", presentation.label)
        .replace("{{check_name}}", &event.check.name)
        .replace("{{entity_name}}", &event.entity.name);

    if let CardDetail::Unresolved {
        execution_time,
        output,
        history,
    } = detail
    {
        markdown = markdown
            .replace("{{execution_time}}", execution_time)
            .replace("{{output}}", output)
            .replace("{{history}}", &format_history(history));
    }

    markdown
}

fn adaptive_card(
    event: &ValidEvent<'_>,
    presentation: &StatusPresentation,
    detail: &CardDetail,
) -> Value {
    let stripe_image = format!("{STATIC_IMAGE_BUCKET}/{}.png", presentation.color);

    let mut facts = vec![json!({
        "title": "**Entity:** ",
        "value": event.entity.name,
    })];
    if let CardDetail::Unresolved {
        execution_time,
        history,
        ..
    } = detail
    {
        facts.push(json!({ "title": "Time", "value": execution_time }));
        facts.push(json!({ "title": "History", "value": format_history(history) }));
    }

    let mut body = vec![
        json!({
            "type": "Container",
            "items": [{
                "type": "ColumnSet",
                "columns": [
                    {
                        "type": "Column",
                        "width": "100px",
                        "items": [{
                            "type": "TextBlock",
                            "text": format!("{} {}", presentation.icon, presentation.label),
                            "size": "Medium",
                            "isSubtle": true,
                        }],
                    },
                    {
                        "type": "Column",
                        "width": "300px",
                        "items": [{
                            "type": "TextBlock",
                            "text": format!("**Check Name**: {}", event.check.name),
                        }],
                    },
                ],
                "horizontalAlignment": "Left",
            }],
            "spacing": "Medium",
            "horizontalAlignment": "Left",
            "style": "default",
        }),
        json!({
            "type": "ColumnSet",
            "columns": [
                {
                    "type": "Column",
                    "width": "5px",
                    "items": [{
                        "type": "Image",
                        "altText": "",
                        "url": stripe_image.clone(),
                        "spacing": "Medium",
                    }],
                    "spacing": "None",
                    "horizontalAlignment": "Center",
                    "backgroundImage": {
                        "url": stripe_image,
                        "fillMode": "RepeatVertically",
                        "horizontalAlignment": "Center",
                    },
                },
                {
                    "type": "Column",
                    "width": "stretch",
                    "items": [{
                        "type": "ColumnSet",
                        "columns": [{
                            "type": "Column",
                            "width": "stretch",
                            "items": [{ "type": "FactSet", "facts": facts }],
                        }],
                    }],
                },
            ],
        }),
    ];

    if let CardDetail::Unresolved { output, .. } = detail {
        body.push(json!({
            "type": "Container",
            "items": [{
                "type": "Container",
                "items": [{
                    "type": "ColumnSet",
                    "columns": [{
                        "type": "Column",
                        "width": "stretch",
                        "items": [{
                            "type": "TextBlock",
                            "text": format!("**Check Output**: {output}"),
                            "wrap": true,
                            "color": "Attention",
                            "separator": true,
                            "horizontalAlignment": "Left",
                            "size": "Small",
                        }],
                    }],
                }],
            }],
        }));
    }

    json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": body,
    })
}

/// Full weekday, MM/DD/YYYY, HH:MM:SS, zone abbreviation.
fn format_execution_time(executed: i64) -> String {
    let time = DateTime::<Utc>::from_timestamp(executed, 0).unwrap_or_default();
    time.format("%A %m/%d/%Y - %H:%M:%S %Z").to_string()
}

/// Strips one trailing newline, if present. Interior newlines and any
/// further trailing ones are kept; the multi-character chomp belongs to the
/// one-line summary only.
fn strip_trailing_newline(output: &str) -> &str {
    output
        .strip_suffix("\r\n")
        .or_else(|| output.strip_suffix('\n'))
        .unwrap_or(output)
}

fn format_history(history: &[String]) -> String {
    format!("[{}]", history.join(" "))
}
