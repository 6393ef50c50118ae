use crate::card::render_message;
use crate::event::{Check, CheckHistory, Entity, Event};
use crate::presentation::{
    event_key, event_summary, formatted_event_action, formatted_message,
};
use crate::validate::{validate_event, ValidEvent};

fn fixture_event(entity_name: &str, check_name: &str) -> Event {
    Event {
        timestamp: 1_600_000_000,
        entity: Some(Entity {
            name: entity_name.to_string(),
            class: "agent".to_string(),
        }),
        check: Some(Check {
            name: check_name.to_string(),
            status: 0,
            output: String::new(),
            executed: 1_600_000_000,
            interval: 60,
            history: vec![
                CheckHistory { status: 0, executed: 1_599_999_880 },
                CheckHistory { status: 2, executed: 1_599_999_940 },
                CheckHistory { status: 1, executed: 1_599_999_820 },
            ],
        }),
    }
}

fn valid(event: &Event) -> ValidEvent<'_> {
    validate_event(event).expect("fixture event should validate")
}

#[test]
fn event_action_follows_status() {
    let mut event = fixture_event("entity1", "check1");
    assert_eq!(formatted_event_action(&valid(&event)), "RESOLVED");

    event.check.as_mut().unwrap().status = 1;
    assert_eq!(formatted_event_action(&valid(&event)), "ALERT");
}

#[test]
fn event_key_joins_entity_and_check() {
    let event = fixture_event("entity1", "check1");
    assert_eq!(event_key(&valid(&event)), "entity1/check1");
}

#[test]
fn event_summary_keeps_short_output() {
    let mut event = fixture_event("entity1", "check1");
    event.check.as_mut().unwrap().output = "disk is full".to_string();
    assert_eq!(
        event_summary(&valid(&event), 100),
        "entity1/check1:disk is full"
    );
}

#[test]
fn event_summary_truncates_long_output() {
    let mut event = fixture_event("entity1", "check1");
    event.check.as_mut().unwrap().output = "disk is full".to_string();
    assert_eq!(event_summary(&valid(&event), 5), "entity1/check1:disk ...");
}

#[test]
fn event_summary_truncation_counts_the_untrimmed_output() {
    let mut event = fixture_event("entity1", "check1");
    // Five visible characters plus trailing newlines: the untrimmed length
    // crosses the limit, so the chomped output still gets the suffix.
    event.check.as_mut().unwrap().output = "disks\n\n\n".to_string();
    assert_eq!(event_summary(&valid(&event), 5), "entity1/check1:disks...");

    // Exactly at the limit: no truncation.
    event.check.as_mut().unwrap().output = "disks".to_string();
    assert_eq!(event_summary(&valid(&event), 5), "entity1/check1:disks");
}

#[test]
fn formatted_message_for_an_alert() {
    let mut event = fixture_event("entity1", "check1");
    {
        let check = event.check.as_mut().unwrap();
        check.status = 1;
        check.output = "disk is full".to_string();
    }
    assert_eq!(
        formatted_message(&valid(&event)),
        "ALERT - entity1/check1:disk is full"
    );
}

#[test]
fn resolved_message_omits_failure_sections() {
    let event = fixture_event("entity1", "check1");
    let payload = render_message(&valid(&event), "ROOM123");

    assert!(!payload.markdown.contains("Execution Time"));
    assert!(!payload.markdown.contains("Check output"));
    assert!(!payload.markdown.contains("History"));
    assert!(payload.markdown.contains("✅ Resolved"));
    assert!(payload.markdown.contains("<b>Check Name:</b> check1"));
    assert!(payload.markdown.contains("<b>Entity:</b> entity1"));

    let card = &payload.attachments[0].content;
    let body = card["body"].as_array().unwrap();
    // Header columns + status stripe; no check-output container.
    assert_eq!(body.len(), 2);
    let facts = body[1]["columns"][1]["items"][0]["columns"][0]["items"][0]["facts"]
        .as_array()
        .unwrap();
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0]["value"], "entity1");
}

#[test]
fn unresolved_message_carries_time_output_and_history() {
    let mut event = fixture_event("entity1", "check1");
    {
        let check = event.check.as_mut().unwrap();
        check.status = 2;
        check.output = "disk is full\n".to_string();
    }
    let payload = render_message(&valid(&event), "ROOM123");

    assert!(payload.markdown.contains("🚨 Critical"));
    assert!(payload
        .markdown
        .contains("<b>Execution Time:</b> Sunday 09/13/2020 - 12:26:40 UTC"));
    assert!(payload.markdown.contains("<b>Check output:</b> disk is full"));
    // History sorted by executed time: warning, ok, critical.
    assert!(payload.markdown.contains("<b>History:</b> [1 0 2]"));

    let card = &payload.attachments[0].content;
    let body = card["body"].as_array().unwrap();
    assert_eq!(body.len(), 3);
    let facts = body[1]["columns"][1]["items"][0]["columns"][0]["items"][0]["facts"]
        .as_array()
        .unwrap();
    assert_eq!(facts.len(), 3);
    assert_eq!(facts[2]["value"], "[1 0 2]");
    let output_text = body[2]["items"][0]["items"][0]["columns"][0]["items"][0]["text"]
        .as_str()
        .unwrap();
    assert_eq!(output_text, "**Check Output**: disk is full");
}

#[test]
fn card_stripe_uses_the_status_color_image() {
    let mut event = fixture_event("entity1", "check1");
    event.check.as_mut().unwrap().status = 1;
    let payload = render_message(&valid(&event), "ROOM123");
    let card = &payload.attachments[0].content;
    let image_url = card["body"][1]["columns"][0]["items"][0]["url"]
        .as_str()
        .unwrap();
    assert_eq!(
        image_url,
        "https://webex-teams-static-image-store.s3.us-east-2.amazonaws.com/warning.png"
    );
}

#[test]
fn room_identifier_with_at_sign_targets_a_person() {
    let event = fixture_event("entity1", "check1");

    let to_room = render_message(&valid(&event), "ROOM123");
    assert_eq!(to_room.room_id.as_deref(), Some("ROOM123"));
    assert!(to_room.to_person_email.is_none());
    let wire = serde_json::to_value(&to_room).unwrap();
    assert!(wire.get("roomId").is_some());
    assert!(wire.get("toPersonEmail").is_none());

    let to_person = render_message(&valid(&event), "oncall@example.com");
    assert_eq!(to_person.to_person_email.as_deref(), Some("oncall@example.com"));
    assert!(to_person.room_id.is_none());
    let wire = serde_json::to_value(&to_person).unwrap();
    assert!(wire.get("toPersonEmail").is_some());
    assert!(wire.get("roomId").is_none());
}

#[test]
fn free_form_output_is_escaped_into_valid_json() {
    let mut event = fixture_event("entity1", "check1");
    {
        let check = event.check.as_mut().unwrap();
        check.status = 2;
        check.output = "line \"one\"\nline two\t<&>".to_string();
    }
    let payload = render_message(&valid(&event), "ROOM123");

    let wire = serde_json::to_string(&payload).unwrap();
    let round_trip: serde_json::Value = serde_json::from_str(&wire).unwrap();
    let markdown = round_trip["markdown"].as_str().unwrap();
    assert!(markdown.contains("line \"one\"\nline two\t<&>"));
}

#[test]
fn whole_pipeline_from_raw_json() {
    let raw = r#"{
        "timestamp": 1600000000,
        "entity": {"name": "entity1", "entity_class": "agent"},
        "check": {
            "name": "check1",
            "status": 1,
            "output": "disk is full\n",
            "executed": 1600000000,
            "interval": 60,
            "history": [
                {"status": 0, "executed": 100},
                {"status": 1, "executed": 200}
            ]
        }
    }"#;
    let event: Event = serde_json::from_str(raw).unwrap();
    let valid = validate_event(&event).unwrap();
    assert_eq!(
        formatted_message(&valid),
        "ALERT - entity1/check1:disk is full"
    );
    let payload = render_message(&valid, "ROOM123");
    assert!(payload.markdown.contains("⚠️ Warning"));
    assert!(payload.markdown.contains("[0 1]"));
}
