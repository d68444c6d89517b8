// End-to-end tests: the built binary against a mock Evolution API server.

use assert_cmd::Command;
use httpmock::prelude::*;
use serde_json::json;

fn evoctl(server_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("evoctl").unwrap();
    cmd.env("EVOLUTION_BASE_URL", server_url)
        .env_remove("EVOLUTION_APIKEY");
    cmd
}

#[test]
fn help_lists_every_command_group() {
    let mut cmd = Command::cargo_bin("evoctl").unwrap();
    let mut assert = cmd.arg("--help").assert().success();
    for group in [
        "instance",
        "proxy",
        "settings",
        "message",
        "call",
        "chat",
        "contact",
        "label",
        "profile",
        "group",
        "broadcast",
        "integration",
    ] {
        assert = assert.stdout(predicates::str::contains(group));
    }
}

#[test]
fn send_text_posts_the_exact_payload_and_renders_rows() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/message/sendText/bot")
            .json_body(json!({"number": "5511999999999", "text": "hi"}));
        then.status(200)
            .json_body(json!({"key": {"id": "BAE5"}, "status": "PENDING"}));
    });

    evoctl(&server.base_url())
        .args([
            "message",
            "send-text",
            "-i",
            "bot",
            "-n",
            "5511999999999",
            "-t",
            "hi",
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains("Text Message Sent"))
        .stdout(predicates::str::contains("key.id"))
        .stdout(predicates::str::contains("BAE5"))
        .stdout(predicates::str::contains("status"))
        .stdout(predicates::str::contains("PENDING"));

    mock.assert();
}

#[test]
fn provided_delay_reaches_the_payload() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/message/sendText/bot")
            .json_body(json!({"number": "5511999999999", "text": "hi", "delay": 500}));
        then.status(200).json_body(json!({"status": "PENDING"}));
    });

    evoctl(&server.base_url())
        .args([
            "message",
            "send-text",
            "-i",
            "bot",
            "-n",
            "5511999999999",
            "-t",
            "hi",
            "--delay",
            "500",
        ])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn apikey_from_the_environment_is_sent_as_a_header() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/settings/find/bot")
            .header("apikey", "sekret");
        then.status(200).json_body(json!({"rejectCall": false}));
    });

    let mut cmd = Command::cargo_bin("evoctl").unwrap();
    cmd.env("EVOLUTION_BASE_URL", server.base_url())
        .env("EVOLUTION_APIKEY", "sekret")
        .args(["settings", "get", "-i", "bot"])
        .assert()
        .success()
        .stdout(predicates::str::contains("rejectCall"));

    mock.assert();
}

#[test]
fn media_mimetype_is_inferred_from_the_mediatype() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/message/sendMedia/bot").json_body(json!({
            "number": "5511999999999",
            "mediatype": "video",
            "media": "http://files.test/clip.mp4",
            "mimetype": "video/mp4",
        }));
        then.status(200).json_body(json!({"status": "PENDING"}));
    });

    evoctl(&server.base_url())
        .args([
            "message",
            "send-media",
            "-i",
            "bot",
            "-n",
            "5511999999999",
            "-m",
            "video",
            "--url",
            "http://files.test/clip.mp4",
        ])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn group_commands_pass_the_jid_as_a_query_parameter() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/group/inviteCode/bot")
            .query_param("groupJid", "123@g.us");
        then.status(200).json_body(json!({"inviteCode": "AbCdEf"}));
    });

    evoctl(&server.base_url())
        .args(["group", "get-invite", "-i", "bot", "-j", "123@g.us"])
        .assert()
        .success()
        .stdout(predicates::str::contains("inviteCode"))
        .stdout(predicates::str::contains("AbCdEf"));

    mock.assert();
}

#[test]
fn check_number_splits_the_list_in_order() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/whatsappNumbers/bot")
            .json_body(json!({"numbers": ["5511999999999", "5511888888888"]}));
        then.status(200).json_body(json!([]));
    });

    evoctl(&server.base_url())
        .args([
            "chat",
            "check-number",
            "-i",
            "bot",
            "-n",
            "5511999999999,5511888888888",
        ])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn http_errors_print_status_and_body_and_abort() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/instance/connectionState/ghost");
        then.status(404).body("instance not found");
    });

    evoctl(&server.base_url())
        .args(["instance", "status", "-i", "ghost"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("404"))
        .stderr(predicates::str::contains("instance not found"));
}

#[test]
fn connection_errors_abort_with_the_cause() {
    // Nothing listens on port 1.
    evoctl("http://127.0.0.1:1")
        .args(["instance", "status", "-i", "bot"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Error"))
        .stderr(predicates::str::contains("request failed"));
}

#[test]
fn broadcast_send_reaches_every_recipient_despite_failures() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(POST)
            .path("/message/sendText/bot")
            .json_body(json!({"number": "A", "text": "hi"}));
        then.status(200).json_body(json!({"status": "PENDING"}));
    });
    let second = server.mock(|when, then| {
        when.method(POST)
            .path("/message/sendText/bot")
            .json_body(json!({"number": "B", "text": "hi"}));
        then.status(500).body("boom");
    });
    let third = server.mock(|when, then| {
        when.method(POST)
            .path("/message/sendText/bot")
            .json_body(json!({"number": "C", "text": "hi"}));
        then.status(200).json_body(json!({"status": "PENDING"}));
    });

    evoctl(&server.base_url())
        .args(["broadcast", "send", "-i", "bot", "--numbers", "A,B,C", "-t", "hi"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Message Sent to A"))
        .stdout(predicates::str::contains("Message Sent to C"))
        .stderr(predicates::str::contains("Error sending to B"));

    first.assert();
    second.assert();
    third.assert();
}

#[test]
fn logout_prints_a_success_line_for_the_empty_response() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/instance/logout/bot");
        then.status(200);
    });

    evoctl(&server.base_url())
        .args(["instance", "logout", "-i", "bot"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Success: Instance bot logged out"));

    mock.assert();
}

#[test]
fn broadcast_create_validates_and_announces() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/whatsappNumbers/bot")
            .json_body(json!({"numbers": ["5511", "5522"]}));
        then.status(200).json_body(json!({}));
    });

    evoctl(&server.base_url())
        .args([
            "broadcast",
            "create",
            "-i",
            "bot",
            "-n",
            "friends",
            "--numbers",
            "5511,5522",
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "List friends created with numbers: 5511,5522",
        ));

    mock.assert();
}
