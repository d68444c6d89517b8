// evoctl - CLI for the Evolution WhatsApp messaging API
// Copyright (C) 2025 the evoctl authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The endpoint catalogue: one pure builder per remote operation.
//!
//! Builders turn typed arguments into a [`Request`] descriptor carrying the
//! method, path template, query parameters and JSON payload for one Evolution
//! API call. Key names are the remote wire contract (mixed camelCase) and are
//! never renamed. Optional arguments only appear in the payload when given;
//! an absent key and an explicit empty value are different things to the
//! server.

use anyhow::{Result, anyhow};
use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: impl Into<Value>) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn with_body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Splits a comma-separated list argument. No escaping, no trimming: a
/// literal comma cannot appear inside an item.
pub fn split_list(input: &str) -> Vec<String> {
    input.split(',').map(str::to_string).collect()
}

/// `image` maps to `image/png`; every other media type is assumed to be
/// `<type>/mp4`. Crude, but it is what the server is driven with.
pub fn media_mimetype(mediatype: &str) -> String {
    if mediatype == "image" {
        "image/png".to_string()
    } else {
        format!("{mediatype}/mp4")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub title: String,
    #[serde(rename = "rowId")]
    pub row_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSection {
    pub title: String,
    pub rows: Vec<ListRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyButton {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "displayText")]
    pub display_text: String,
    pub id: String,
}

/// Parses `title:row1,row2;title2:row3` into list sections. Row IDs are
/// generated as `row_0`, `row_1`, ... within each section.
pub fn parse_sections(input: &str) -> Result<Vec<ListSection>> {
    input
        .split(';')
        .map(|section| {
            let (title, rows) = section
                .split_once(':')
                .ok_or_else(|| anyhow!("section `{section}` must look like `title:row1,row2`"))?;
            Ok(ListSection {
                title: title.to_string(),
                rows: rows
                    .split(',')
                    .enumerate()
                    .map(|(i, row)| ListRow {
                        title: row.to_string(),
                        row_id: format!("row_{i}"),
                    })
                    .collect(),
            })
        })
        .collect()
}

/// Parses `label:id,label2:id2` into reply buttons.
pub fn parse_buttons(input: &str) -> Result<Vec<ReplyButton>> {
    input
        .split(',')
        .map(|button| {
            let (label, id) = button
                .split_once(':')
                .ok_or_else(|| anyhow!("button `{button}` must look like `label:id`"))?;
            Ok(ReplyButton {
                kind: "reply".to_string(),
                display_text: label.to_string(),
                id: id.to_string(),
            })
        })
        .collect()
}

// ---- root ----------------------------------------------------------------

pub fn info() -> Request {
    Request::get("")
}

// ---- instance ------------------------------------------------------------

pub fn instance_create(instance: &str, qrcode: bool, number: Option<&str>) -> Request {
    let mut payload = Map::new();
    payload.insert("instanceName".into(), json!(instance));
    payload.insert("qrcode".into(), json!(qrcode));
    payload.insert("integration".into(), json!("WHATSAPP-BAILEYS"));
    if let Some(number) = number {
        payload.insert("number".into(), json!(number));
    }
    Request::post("/instance/create", payload)
}

pub fn instance_list(name: Option<&str>, id: Option<&str>) -> Request {
    let mut request = Request::get("/instance/fetchInstances");
    if let Some(name) = name {
        request = request.with_query("instanceName", name);
    }
    if let Some(id) = id {
        request = request.with_query("instanceId", id);
    }
    request
}

pub fn instance_connect(instance: &str, number: Option<&str>) -> Request {
    let mut request = Request::get(format!("/instance/connect/{instance}"));
    if let Some(number) = number {
        request = request.with_query("number", number);
    }
    request
}

pub fn instance_restart(instance: &str) -> Request {
    Request::new(Method::POST, format!("/instance/restart/{instance}"))
}

pub fn instance_set_presence(instance: &str, presence: &str) -> Request {
    Request::post(
        format!("/instance/setPresence/{instance}"),
        json!({"presence": presence}),
    )
}

pub fn instance_connection_state(instance: &str) -> Request {
    Request::get(format!("/instance/connectionState/{instance}"))
}

pub fn instance_logout(instance: &str) -> Request {
    Request::new(Method::DELETE, format!("/instance/logout/{instance}"))
}

pub fn instance_delete(instance: &str) -> Request {
    Request::new(Method::DELETE, format!("/instance/delete/{instance}"))
}

// ---- proxy ---------------------------------------------------------------

pub fn proxy_set(
    instance: &str,
    host: &str,
    port: &str,
    protocol: &str,
    username: Option<&str>,
    password: Option<&str>,
) -> Request {
    let mut payload = Map::new();
    payload.insert("enabled".into(), json!(true));
    payload.insert("host".into(), json!(host));
    // The server expects the port as a string.
    payload.insert("port".into(), json!(port));
    payload.insert("protocol".into(), json!(protocol));
    if let Some(username) = username {
        payload.insert("username".into(), json!(username));
    }
    if let Some(password) = password {
        payload.insert("password".into(), json!(password));
    }
    Request::post(format!("/proxy/set/{instance}"), payload)
}

pub fn proxy_find(instance: &str) -> Request {
    Request::get(format!("/proxy/find/{instance}"))
}

// ---- settings ------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
pub fn settings_set(
    instance: &str,
    reject_call: bool,
    groups_ignore: bool,
    always_online: bool,
    read_messages: bool,
    sync_full_history: bool,
    read_status: bool,
    msg_call: Option<&str>,
) -> Request {
    let mut payload = Map::new();
    payload.insert("rejectCall".into(), json!(reject_call));
    payload.insert("groupsIgnore".into(), json!(groups_ignore));
    payload.insert("alwaysOnline".into(), json!(always_online));
    payload.insert("readMessages".into(), json!(read_messages));
    payload.insert("syncFullHistory".into(), json!(sync_full_history));
    payload.insert("readStatus".into(), json!(read_status));
    if let Some(msg_call) = msg_call {
        payload.insert("msgCall".into(), json!(msg_call));
    }
    Request::post(format!("/settings/set/{instance}"), payload)
}

pub fn settings_find(instance: &str) -> Request {
    Request::get(format!("/settings/find/{instance}"))
}

// ---- message -------------------------------------------------------------

pub fn send_text(instance: &str, number: &str, text: &str, delay: Option<u64>) -> Request {
    let mut payload = Map::new();
    payload.insert("number".into(), json!(number));
    payload.insert("text".into(), json!(text));
    if let Some(delay) = delay {
        payload.insert("delay".into(), json!(delay));
    }
    Request::post(format!("/message/sendText/{instance}"), payload)
}

#[allow(clippy::too_many_arguments)]
pub fn send_media(
    instance: &str,
    number: &str,
    mediatype: &str,
    url: &str,
    caption: Option<&str>,
    filename: Option<&str>,
    delay: Option<u64>,
) -> Request {
    let mut payload = Map::new();
    payload.insert("number".into(), json!(number));
    payload.insert("mediatype".into(), json!(mediatype));
    payload.insert("media".into(), json!(url));
    payload.insert("mimetype".into(), json!(media_mimetype(mediatype)));
    if let Some(caption) = caption {
        payload.insert("caption".into(), json!(caption));
    }
    if let Some(filename) = filename {
        payload.insert("fileName".into(), json!(filename));
    }
    if let Some(delay) = delay {
        payload.insert("delay".into(), json!(delay));
    }
    Request::post(format!("/message/sendMedia/{instance}"), payload)
}

pub fn send_ptv(instance: &str, number: &str, video: &str, delay: Option<u64>) -> Request {
    let mut payload = Map::new();
    payload.insert("number".into(), json!(number));
    payload.insert("video".into(), json!(video));
    if let Some(delay) = delay {
        payload.insert("delay".into(), json!(delay));
    }
    Request::post(format!("/message/sendPtv/{instance}"), payload)
}

pub fn send_audio(instance: &str, number: &str, audio: &str, delay: Option<u64>) -> Request {
    let mut payload = Map::new();
    payload.insert("number".into(), json!(number));
    payload.insert("audio".into(), json!(audio));
    if let Some(delay) = delay {
        payload.insert("delay".into(), json!(delay));
    }
    Request::post(format!("/message/sendWhatsAppAudio/{instance}"), payload)
}

pub fn send_status(
    instance: &str,
    status_type: &str,
    content: &str,
    all_contacts: bool,
    status_jid: Option<&str>,
) -> Request {
    let mut payload = Map::new();
    payload.insert("type".into(), json!(status_type));
    payload.insert("content".into(), json!(content));
    payload.insert("allContacts".into(), json!(all_contacts));
    if let Some(jid) = status_jid {
        payload.insert("statusJidList".into(), json!([jid]));
    }
    Request::post(format!("/message/sendStatus/{instance}"), payload)
}

pub fn send_sticker(instance: &str, number: &str, sticker: &str, delay: Option<u64>) -> Request {
    let mut payload = Map::new();
    payload.insert("number".into(), json!(number));
    payload.insert("sticker".into(), json!(sticker));
    if let Some(delay) = delay {
        payload.insert("delay".into(), json!(delay));
    }
    Request::post(format!("/message/sendSticker/{instance}"), payload)
}

#[allow(clippy::too_many_arguments)]
pub fn send_location(
    instance: &str,
    number: &str,
    name: &str,
    address: &str,
    latitude: f64,
    longitude: f64,
    delay: Option<u64>,
) -> Request {
    let mut payload = Map::new();
    payload.insert("number".into(), json!(number));
    payload.insert("name".into(), json!(name));
    payload.insert("address".into(), json!(address));
    payload.insert("latitude".into(), json!(latitude));
    payload.insert("longitude".into(), json!(longitude));
    if let Some(delay) = delay {
        payload.insert("delay".into(), json!(delay));
    }
    Request::post(format!("/message/sendLocation/{instance}"), payload)
}

#[allow(clippy::too_many_arguments)]
pub fn send_contact(
    instance: &str,
    number: &str,
    full_name: &str,
    phone_number: &str,
    organization: Option<&str>,
    email: Option<&str>,
    url: Option<&str>,
) -> Request {
    let mut contact = Map::new();
    contact.insert("fullName".into(), json!(full_name));
    contact.insert("phoneNumber".into(), json!(phone_number));
    if let Some(organization) = organization {
        contact.insert("organization".into(), json!(organization));
    }
    if let Some(email) = email {
        contact.insert("email".into(), json!(email));
    }
    if let Some(url) = url {
        contact.insert("url".into(), json!(url));
    }
    Request::post(
        format!("/message/sendContact/{instance}"),
        json!({"number": number, "contact": [contact]}),
    )
}

pub fn send_reaction(instance: &str, remote_jid: &str, message_id: &str, reaction: &str) -> Request {
    Request::post(
        format!("/message/sendReaction/{instance}"),
        json!({
            "key": {"remoteJid": remote_jid, "fromMe": true, "id": message_id},
            "reaction": reaction,
        }),
    )
}

pub fn send_poll(
    instance: &str,
    number: &str,
    name: &str,
    values: &str,
    selectable_count: u32,
    delay: Option<u64>,
) -> Request {
    let mut payload = Map::new();
    payload.insert("number".into(), json!(number));
    payload.insert("name".into(), json!(name));
    payload.insert("selectableCount".into(), json!(selectable_count));
    payload.insert("values".into(), json!(split_list(values)));
    if let Some(delay) = delay {
        payload.insert("delay".into(), json!(delay));
    }
    Request::post(format!("/message/sendPoll/{instance}"), payload)
}

pub fn send_list(
    instance: &str,
    number: &str,
    title: &str,
    description: &str,
    button_text: &str,
    sections: &str,
) -> Result<Request> {
    let sections = parse_sections(sections)?;
    Ok(Request::post(
        format!("/message/sendList/{instance}"),
        json!({
            "number": number,
            "title": title,
            "description": description,
            "buttonText": button_text,
            "sections": sections,
        }),
    ))
}

pub fn send_buttons(
    instance: &str,
    number: &str,
    title: &str,
    description: &str,
    buttons: &str,
) -> Result<Request> {
    let buttons = parse_buttons(buttons)?;
    Ok(Request::post(
        format!("/message/sendButtons/{instance}"),
        json!({
            "number": number,
            "title": title,
            "description": description,
            "buttons": buttons,
        }),
    ))
}

// ---- call ----------------------------------------------------------------

pub fn call_offer(instance: &str, number: &str, is_video: bool, duration: u32) -> Request {
    Request::post(
        format!("/call/offer/{instance}"),
        json!({"number": number, "isVideo": is_video, "callDuration": duration}),
    )
}

// ---- chat ----------------------------------------------------------------

pub fn whatsapp_numbers(instance: &str, numbers: Vec<String>) -> Request {
    Request::post(
        format!("/chat/whatsappNumbers/{instance}"),
        json!({"numbers": numbers}),
    )
}

pub fn mark_message_read(instance: &str, remote_jid: &str, message_id: &str) -> Request {
    Request::post(
        format!("/chat/markMessageAsRead/{instance}"),
        json!({
            "readMessages": [{"remoteJid": remote_jid, "fromMe": false, "id": message_id}],
        }),
    )
}

pub fn archive_chat(instance: &str, remote_jid: &str, message_id: &str, archive: bool) -> Request {
    Request::post(
        format!("/chat/archiveChat/{instance}"),
        json!({
            "lastMessage": {
                "key": {"remoteJid": remote_jid, "fromMe": false, "id": message_id},
            },
            "chat": remote_jid,
            "archive": archive,
        }),
    )
}

pub fn mark_chat_unread(instance: &str, remote_jid: &str, message_id: &str) -> Request {
    Request::post(
        format!("/chat/markChatUnread/{instance}"),
        json!({
            "lastMessage": {
                "key": {"remoteJid": remote_jid, "fromMe": false, "id": message_id},
            },
            "chat": remote_jid,
        }),
    )
}

pub fn delete_message(instance: &str, remote_jid: &str, message_id: &str) -> Request {
    Request::new(
        Method::DELETE,
        format!("/chat/deleteMessageForEveryone/{instance}"),
    )
    .with_body(json!({"id": message_id, "remoteJid": remote_jid, "fromMe": true}))
}

pub fn fetch_profile_picture(instance: &str, number: &str) -> Request {
    Request::post(
        format!("/chat/fetchProfilePictureUrl/{instance}"),
        json!({"number": number}),
    )
}

pub fn media_base64(instance: &str, message_id: &str, convert_to_mp4: bool) -> Request {
    Request::post(
        format!("/chat/getBase64FromMediaMessage/{instance}"),
        json!({
            "message": {"key": {"id": message_id}},
            "convertToMp4": convert_to_mp4,
        }),
    )
}

pub fn update_message(
    instance: &str,
    number: &str,
    remote_jid: &str,
    message_id: &str,
    text: &str,
) -> Request {
    Request::post(
        format!("/chat/updateMessage/{instance}"),
        json!({
            "number": number,
            "key": {"remoteJid": remote_jid, "fromMe": true, "id": message_id},
            "text": text,
        }),
    )
}

pub fn send_presence(instance: &str, number: &str, presence: &str, delay: Option<u64>) -> Request {
    let mut payload = Map::new();
    payload.insert("number".into(), json!(number));
    payload.insert("presence".into(), json!(presence));
    if let Some(delay) = delay {
        payload.insert("delay".into(), json!(delay));
    }
    Request::post(format!("/chat/sendPresence/{instance}"), payload)
}

/// Blocking lives under the message controller on the server side.
pub fn update_block_status(instance: &str, number: &str, status: &str) -> Request {
    Request::post(
        format!("/message/updateBlockStatus/{instance}"),
        json!({"number": number, "status": status}),
    )
}

pub fn find_contacts(instance: &str, contact_id: Option<&str>) -> Request {
    let mut where_clause = Map::new();
    if let Some(id) = contact_id {
        where_clause.insert("id".into(), json!(id));
    }
    Request::post(
        format!("/chat/findContacts/{instance}"),
        json!({"where": where_clause}),
    )
}

pub fn find_messages(instance: &str, remote_jid: &str, page: u32, offset: u32) -> Request {
    Request::post(
        format!("/chat/findMessages/{instance}"),
        json!({
            "where": {"key": {"remoteJid": remote_jid}},
            "page": page,
            "offset": offset,
        }),
    )
}

pub fn find_status_messages(
    instance: &str,
    remote_jid: Option<&str>,
    status_id: Option<&str>,
    page: u32,
    offset: u32,
) -> Request {
    let mut where_clause = Map::new();
    if let Some(remote_jid) = remote_jid {
        where_clause.insert("remoteJid".into(), json!(remote_jid));
    }
    if let Some(status_id) = status_id {
        where_clause.insert("id".into(), json!(status_id));
    }
    Request::post(
        format!("/chat/findStatusMessage/{instance}"),
        json!({"where": where_clause, "page": page, "offset": offset}),
    )
}

pub fn find_chats(instance: &str) -> Request {
    Request::new(Method::POST, format!("/chat/findChats/{instance}"))
}

/// `contact add` in name only: the server has no add-contact endpoint, so
/// this searches the contact store with a `where` filter instead.
pub fn contact_search(
    instance: &str,
    number: &str,
    full_name: &str,
    organization: Option<&str>,
    email: Option<&str>,
    url: Option<&str>,
) -> Request {
    let mut where_clause = Map::new();
    where_clause.insert("id".into(), json!(number));
    where_clause.insert("pushName".into(), json!(full_name));
    if let Some(organization) = organization {
        where_clause.insert("organization".into(), json!(organization));
    }
    if let Some(email) = email {
        where_clause.insert("email".into(), json!(email));
    }
    if let Some(url) = url {
        where_clause.insert("url".into(), json!(url));
    }
    Request::post(
        format!("/chat/findContacts/{instance}"),
        json!({"where": where_clause}),
    )
}

// ---- label ---------------------------------------------------------------

pub fn find_labels(instance: &str) -> Request {
    Request::get(format!("/label/findLabels/{instance}"))
}

pub fn handle_label(instance: &str, number: &str, label_id: &str, action: &str) -> Request {
    Request::post(
        format!("/label/handleLabel/{instance}"),
        json!({"number": number, "labelId": label_id, "action": action}),
    )
}

// ---- profile -------------------------------------------------------------

pub fn fetch_business_profile(instance: &str, number: &str) -> Request {
    Request::post(
        format!("/chat/fetchBusinessProfile/{instance}"),
        json!({"number": number}),
    )
}

pub fn fetch_profile(instance: &str, number: &str) -> Request {
    Request::post(
        format!("/chat/fetchProfile/{instance}"),
        json!({"number": number}),
    )
}

pub fn update_profile_name(instance: &str, name: &str) -> Request {
    Request::post(
        format!("/chat/updateProfileName/{instance}"),
        json!({"name": name}),
    )
}

pub fn update_profile_status(instance: &str, status: &str) -> Request {
    Request::post(
        format!("/chat/updateProfileStatus/{instance}"),
        json!({"status": status}),
    )
}

pub fn update_profile_picture(instance: &str, picture: &str) -> Request {
    Request::post(
        format!("/chat/updateProfilePicture/{instance}"),
        json!({"picture": picture}),
    )
}

pub fn remove_profile_picture(instance: &str) -> Request {
    Request::new(
        Method::DELETE,
        format!("/chat/removeProfilePicture/{instance}"),
    )
}

pub fn fetch_privacy_settings(instance: &str) -> Request {
    Request::get(format!("/chat/fetchPrivacySettings/{instance}"))
}

#[allow(clippy::too_many_arguments)]
pub fn update_privacy_settings(
    instance: &str,
    readreceipts: &str,
    profile: &str,
    status: &str,
    online: &str,
    last: &str,
    groupadd: &str,
) -> Request {
    Request::post(
        format!("/chat/updatePrivacySettings/{instance}"),
        json!({
            "readreceipts": readreceipts,
            "profile": profile,
            "status": status,
            "online": online,
            "last": last,
            "groupadd": groupadd,
        }),
    )
}

// ---- group ---------------------------------------------------------------
// Group operations address the group through a `groupJid` query parameter,
// not the path.

pub fn group_create(instance: &str, subject: &str, participants: &str, description: Option<&str>) -> Request {
    let mut payload = Map::new();
    payload.insert("subject".into(), json!(subject));
    payload.insert("participants".into(), json!(split_list(participants)));
    if let Some(description) = description {
        payload.insert("description".into(), json!(description));
    }
    Request::post(format!("/group/create/{instance}"), payload)
}

pub fn group_update_picture(instance: &str, group_jid: &str, image: &str) -> Request {
    Request::post(
        format!("/group/updateGroupPicture/{instance}"),
        json!({"image": image}),
    )
    .with_query("groupJid", group_jid)
}

pub fn group_update_subject(instance: &str, group_jid: &str, subject: &str) -> Request {
    Request::post(
        format!("/group/updateGroupSubject/{instance}"),
        json!({"subject": subject}),
    )
    .with_query("groupJid", group_jid)
}

pub fn group_update_description(instance: &str, group_jid: &str, description: &str) -> Request {
    Request::post(
        format!("/group/updateGroupDescription/{instance}"),
        json!({"description": description}),
    )
    .with_query("groupJid", group_jid)
}

pub fn group_invite_code(instance: &str, group_jid: &str) -> Request {
    Request::get(format!("/group/inviteCode/{instance}")).with_query("groupJid", group_jid)
}

pub fn group_revoke_invite(instance: &str, group_jid: &str) -> Request {
    Request::new(Method::POST, format!("/group/revokeInviteCode/{instance}"))
        .with_query("groupJid", group_jid)
}

pub fn group_send_invite(
    instance: &str,
    group_jid: &str,
    numbers: &str,
    description: Option<&str>,
) -> Request {
    let mut payload = Map::new();
    payload.insert("groupJid".into(), json!(group_jid));
    payload.insert("numbers".into(), json!(split_list(numbers)));
    if let Some(description) = description {
        payload.insert("description".into(), json!(description));
    }
    Request::post(format!("/group/sendInvite/{instance}"), payload)
}

pub fn group_invite_info(instance: &str, invite_code: &str) -> Request {
    Request::get(format!("/group/inviteInfo/{instance}")).with_query("inviteCode", invite_code)
}

pub fn group_find(instance: &str, group_jid: &str) -> Request {
    Request::get(format!("/group/findGroupInfos/{instance}")).with_query("groupJid", group_jid)
}

pub fn group_fetch_all(instance: &str, get_participants: bool) -> Request {
    Request::get(format!("/group/fetchAllGroups/{instance}"))
        .with_query("getParticipants", get_participants.to_string())
}

pub fn group_participants(instance: &str, group_jid: &str) -> Request {
    Request::get(format!("/group/participants/{instance}")).with_query("groupJid", group_jid)
}

pub fn group_update_participant(
    instance: &str,
    group_jid: &str,
    action: &str,
    participants: &str,
) -> Request {
    Request::post(
        format!("/group/updateParticipant/{instance}"),
        json!({"action": action, "participants": split_list(participants)}),
    )
    .with_query("groupJid", group_jid)
}

pub fn group_update_setting(instance: &str, group_jid: &str, action: &str) -> Request {
    Request::post(
        format!("/group/updateSetting/{instance}"),
        json!({"action": action}),
    )
    .with_query("groupJid", group_jid)
}

pub fn group_toggle_ephemeral(instance: &str, group_jid: &str, expiration: u64) -> Request {
    Request::post(
        format!("/group/toggleEphemeral/{instance}"),
        json!({"expiration": expiration}),
    )
    .with_query("groupJid", group_jid)
}

pub fn group_leave(instance: &str, group_jid: &str) -> Request {
    Request::new(Method::DELETE, format!("/group/leaveGroup/{instance}"))
        .with_query("groupJid", group_jid)
}

// ---- integrations --------------------------------------------------------

/// The websocket, RabbitMQ and SQS event streams share one wire shape:
/// `{"<channel>": {"enabled": true, "events": [...]}}` posted to
/// `/<channel>/set/{instance}`.
pub fn event_stream_set(channel: &str, instance: &str, events: &str) -> Request {
    Request::post(
        format!("/{channel}/set/{instance}"),
        json!({channel: {"enabled": true, "events": split_list(events)}}),
    )
}

pub fn event_stream_find(channel: &str, instance: &str) -> Request {
    Request::get(format!("/{channel}/find/{instance}"))
}

pub fn webhook_set(instance: &str, url: &str, events: &str) -> Request {
    Request::post(
        format!("/webhook/set/{instance}"),
        json!({
            "webhook": {
                "enabled": true,
                "url": url,
                "byEvents": false,
                "base64": false,
                "events": split_list(events),
            },
        }),
    )
}

pub fn webhook_find(instance: &str) -> Request {
    Request::get(format!("/webhook/find/{instance}"))
}

pub fn chatwoot_set(
    instance: &str,
    account_id: &str,
    token: &str,
    url: &str,
    name_inbox: &str,
) -> Request {
    Request::post(
        format!("/chatwoot/set/{instance}"),
        json!({
            "enabled": true,
            "accountId": account_id,
            "token": token,
            "url": url,
            "nameInbox": name_inbox,
            "signMsg": true,
            "reopenConversation": true,
            "conversationPending": false,
        }),
    )
}

pub fn chatwoot_find(instance: &str) -> Request {
    Request::get(format!("/chatwoot/find/{instance}"))
}

pub fn typebot_create(instance: &str, url: &str, typebot: &str, trigger_value: &str) -> Request {
    Request::post(
        format!("/typebot/create/{instance}"),
        json!({
            "enabled": true,
            "url": url,
            "typebot": typebot,
            "triggerType": "keyword",
            "triggerOperator": "regex",
            "triggerValue": trigger_value,
            "expire": 20,
            "keywordFinish": "#SAIR",
            "delayMessage": 1000,
            "unknownMessage": "Mensagem não reconhecida",
        }),
    )
}

pub fn typebot_find(instance: &str) -> Request {
    Request::get(format!("/typebot/find/{instance}"))
}

pub fn openai_create(
    instance: &str,
    creds_id: &str,
    bot_type: &str,
    assistant_id: Option<&str>,
) -> Request {
    let mut payload = Map::new();
    payload.insert("enabled".into(), json!(true));
    payload.insert("openaiCredsId".into(), json!(creds_id));
    payload.insert("botType".into(), json!(bot_type));
    if let Some(assistant_id) = assistant_id {
        payload.insert("assistantId".into(), json!(assistant_id));
    }
    Request::post(format!("/openai/create/{instance}"), payload)
}

pub fn dify_create(instance: &str, bot_type: &str, api_url: &str, api_key: &str) -> Request {
    Request::post(
        format!("/dify/create/{instance}"),
        json!({
            "enabled": true,
            "botType": bot_type,
            "apiUrl": api_url,
            "apiKey": api_key,
        }),
    )
}

pub fn flowise_create(instance: &str, api_url: &str, api_key: Option<&str>) -> Request {
    let mut payload = Map::new();
    payload.insert("enabled".into(), json!(true));
    payload.insert("apiUrl".into(), json!(api_url));
    if let Some(api_key) = api_key {
        payload.insert("apiKey".into(), json!(api_key));
    }
    Request::post(format!("/flowise/create/{instance}"), payload)
}

pub fn template_send(instance: &str, number: &str, name: &str, language: &str) -> Request {
    Request::post(
        format!("/message/sendTemplate/{instance}"),
        json!({"number": number, "name": name, "language": language}),
    )
}

pub fn template_create(
    instance: &str,
    name: &str,
    category: &str,
    language: &str,
    body_text: &str,
) -> Request {
    Request::post(
        format!("/template/create/{instance}"),
        json!({
            "name": name,
            "category": category,
            "language": language,
            "components": [{"type": "BODY", "text": body_text}],
        }),
    )
}

pub fn template_find(instance: &str) -> Request {
    Request::get(format!("/template/find/{instance}"))
}

pub fn s3_media(instance: &str, media_id: Option<&str>) -> Request {
    let mut payload = Map::new();
    if let Some(media_id) = media_id {
        payload.insert("id".into(), json!(media_id));
    }
    Request::post(format!("/s3/getMedia/{instance}"), payload)
}

pub fn s3_media_url(instance: &str, media_id: &str) -> Request {
    Request::post(
        format!("/s3/getMediaUrl/{instance}"),
        json!({"id": media_id}),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_preserves_order_and_does_not_trim() {
        assert_eq!(
            split_list("5511999999999,5511888888888"),
            vec!["5511999999999", "5511888888888"]
        );
        assert_eq!(split_list("a, b"), vec!["a", " b"]);
    }

    #[test]
    fn mimetype_is_png_for_images_and_mp4_for_everything_else() {
        assert_eq!(media_mimetype("image"), "image/png");
        assert_eq!(media_mimetype("video"), "video/mp4");
        assert_eq!(media_mimetype("document"), "document/mp4");
    }

    #[test]
    fn omitted_options_leave_no_key_behind() {
        let request = send_text("bot", "5511999999999", "hi", None);
        let body = request.body.unwrap();
        assert_eq!(body, json!({"number": "5511999999999", "text": "hi"}));
    }

    #[test]
    fn provided_options_keep_their_exact_value() {
        let request = send_text("bot", "5511999999999", "hi", Some(0));
        assert_eq!(
            request.body.unwrap(),
            json!({"number": "5511999999999", "text": "hi", "delay": 0})
        );
    }

    #[test]
    fn request_construction_is_deterministic() {
        let a = send_media("bot", "551199", "video", "http://x/v.mp4", None, None, Some(5));
        let b = send_media("bot", "551199", "video", "http://x/v.mp4", None, None, Some(5));
        assert_eq!(a, b);
    }

    #[test]
    fn media_payload_carries_inferred_mimetype() {
        let request = send_media("bot", "551199", "image", "http://x/p.png", None, None, None);
        assert_eq!(request.path, "/message/sendMedia/bot");
        assert_eq!(
            request.body.unwrap(),
            json!({
                "number": "551199",
                "mediatype": "image",
                "media": "http://x/p.png",
                "mimetype": "image/png",
            })
        );
    }

    #[test]
    fn sections_split_on_semicolon_with_per_section_row_ids() {
        let sections = parse_sections("Fruit:apple,banana;Veg:carrot").unwrap();
        assert_eq!(
            sections,
            vec![
                ListSection {
                    title: "Fruit".into(),
                    rows: vec![
                        ListRow { title: "apple".into(), row_id: "row_0".into() },
                        ListRow { title: "banana".into(), row_id: "row_1".into() },
                    ],
                },
                ListSection {
                    title: "Veg".into(),
                    rows: vec![ListRow { title: "carrot".into(), row_id: "row_0".into() }],
                },
            ]
        );
    }

    #[test]
    fn malformed_section_is_an_error() {
        assert!(parse_sections("no-colon-here").is_err());
    }

    #[test]
    fn buttons_become_reply_buttons() {
        let buttons = parse_buttons("Yes:yes_1,No:no_1").unwrap();
        assert_eq!(
            serde_json::to_value(&buttons).unwrap(),
            json!([
                {"type": "reply", "displayText": "Yes", "id": "yes_1"},
                {"type": "reply", "displayText": "No", "id": "no_1"},
            ])
        );
    }

    #[test]
    fn malformed_button_is_an_error() {
        assert!(parse_buttons("Yes:yes_1,bare").is_err());
    }

    #[test]
    fn instance_create_defaults_to_baileys_integration() {
        let request = instance_create("bot", true, None);
        assert_eq!(request.path, "/instance/create");
        assert_eq!(
            request.body.unwrap(),
            json!({"instanceName": "bot", "qrcode": true, "integration": "WHATSAPP-BAILEYS"})
        );
    }

    #[test]
    fn group_operations_address_the_group_via_query() {
        let request = group_update_subject("bot", "123@g.us", "new");
        assert_eq!(request.path, "/group/updateGroupSubject/bot");
        assert_eq!(request.query, vec![("groupJid".to_string(), "123@g.us".to_string())]);

        let request = group_fetch_all("bot", false);
        assert_eq!(
            request.query,
            vec![("getParticipants".to_string(), "false".to_string())]
        );
    }

    #[test]
    fn poll_values_split_in_order() {
        let request = send_poll("bot", "551199", "Lunch?", "pizza,sushi,salad", 1, None);
        assert_eq!(
            request.body.unwrap()["values"],
            json!(["pizza", "sushi", "salad"])
        );
    }

    #[test]
    fn event_streams_nest_the_channel_key() {
        let request = event_stream_set("rabbitmq", "bot", "MESSAGES_UPSERT,SEND_MESSAGE");
        assert_eq!(request.path, "/rabbitmq/set/bot");
        assert_eq!(
            request.body.unwrap(),
            json!({"rabbitmq": {"enabled": true, "events": ["MESSAGES_UPSERT", "SEND_MESSAGE"]}})
        );
    }

    #[test]
    fn webhook_defaults_are_fixed() {
        let request = webhook_set("bot", "https://hooks.test/evo", "MESSAGES_UPSERT");
        assert_eq!(
            request.body.unwrap(),
            json!({
                "webhook": {
                    "enabled": true,
                    "url": "https://hooks.test/evo",
                    "byEvents": false,
                    "base64": false,
                    "events": ["MESSAGES_UPSERT"],
                },
            })
        );
    }

    #[test]
    fn contact_search_builds_a_where_filter() {
        let request = contact_search("bot", "5511999999999", "Ana", None, None, None);
        assert_eq!(request.path, "/chat/findContacts/bot");
        assert_eq!(
            request.body.unwrap(),
            json!({"where": {"id": "5511999999999", "pushName": "Ana"}})
        );
    }

    #[test]
    fn delete_message_sends_key_material_in_the_body() {
        let request = delete_message("bot", "551199@s.whatsapp.net", "BAE5");
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(
            request.body.unwrap(),
            json!({"id": "BAE5", "remoteJid": "551199@s.whatsapp.net", "fromMe": true})
        );
    }

    #[test]
    fn status_jid_becomes_a_single_element_list() {
        let request = send_status("bot", "text", "hello", false, Some("551188@s.whatsapp.net"));
        assert_eq!(
            request.body.unwrap(),
            json!({
                "type": "text",
                "content": "hello",
                "allContacts": false,
                "statusJidList": ["551188@s.whatsapp.net"],
            })
        );
    }
}
