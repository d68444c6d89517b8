mod client;
mod config;
mod endpoints;
mod render;

use crate::client::ApiClient;
use crate::endpoints::Request;
use crate::render::OutputFormat;
use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::Colorize;
use std::{io, process};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "evoctl",
    version,
    about = "CLI for the Evolution WhatsApp messaging API"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "URL",
        help = "Base URL override for this invocation (otherwise EVOLUTION_BASE_URL)"
    )]
    base_url: Option<String>,

    #[arg(
        long,
        global = true,
        value_name = "KEY",
        help = "API key override for this invocation (otherwise EVOLUTION_APIKEY)"
    )]
    apikey: Option<String>,

    #[arg(
        long,
        short = 'o',
        value_enum,
        default_value_t = OutputFormat::Pretty,
        global = true,
        help = "Output format (propagates to subcommands)"
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show API status and version information
    Info,
    /// Manage instances (named WhatsApp sessions)
    #[command(subcommand)]
    Instance(InstanceCommand),
    /// Manage the outbound proxy of an instance
    #[command(subcommand)]
    Proxy(ProxyCommand),
    /// Manage instance behavior settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Send messages
    #[command(subcommand)]
    Message(MessageCommand),
    /// Calls
    #[command(subcommand)]
    Call(CallCommand),
    /// Chat operations
    #[command(subcommand)]
    Chat(ChatCommand),
    /// Contact operations
    #[command(subcommand)]
    Contact(ContactCommand),
    /// Manage labels
    #[command(subcommand)]
    Label(LabelCommand),
    /// Manage the connected profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Manage groups
    #[command(subcommand)]
    Group(GroupCommand),
    /// Broadcast helpers
    #[command(subcommand)]
    Broadcast(BroadcastCommand),
    /// Manage integrations (event streams, bots, templates, S3)
    #[command(subcommand)]
    Integration(IntegrationCommand),
    /// Generate shell completion scripts
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum InstanceCommand {
    /// Create a new instance
    Create {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(
            long,
            action = ArgAction::Set,
            default_value_t = true,
            value_name = "BOOL",
            help = "Request a QR code for pairing"
        )]
        qrcode: bool,
        #[arg(long, short = 'n', help = "Phone number to pair with")]
        number: Option<String>,
    },
    /// List instances
    List {
        #[arg(long, short = 'i', help = "Filter by instance name")]
        instance: Option<String>,
        #[arg(long, help = "Filter by instance ID")]
        instance_id: Option<String>,
    },
    /// Connect an instance
    Connect {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: Option<String>,
    },
    /// Restart an instance
    Restart {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Set the instance presence
    SetPresence {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'p', help = "Presence (available, unavailable)")]
        presence: String,
    },
    /// Show the connection state
    Status {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Log an instance out
    Logout {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Delete an instance
    Delete {
        #[arg(long, short = 'i')]
        instance: String,
    },
}

#[derive(Subcommand)]
enum ProxyCommand {
    /// Configure the proxy
    Set {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long)]
        host: String,
        #[arg(long)]
        port: String,
        #[arg(long, default_value = "http", help = "Protocol (http, https)")]
        protocol: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Show the proxy configuration
    Get {
        #[arg(long, short = 'i')]
        instance: String,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Update instance settings
    Set {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, help = "Reject incoming calls")]
        reject_call: bool,
        #[arg(long, help = "Message sent when a call is rejected")]
        msg_call: Option<String>,
        #[arg(long, help = "Ignore group messages")]
        groups_ignore: bool,
        #[arg(long, help = "Keep the instance always online")]
        always_online: bool,
        #[arg(long, help = "Mark incoming messages as read")]
        read_messages: bool,
        #[arg(long, help = "Sync the full message history")]
        sync_full_history: bool,
        #[arg(long, help = "Mark status updates as read")]
        read_status: bool,
    },
    /// Show instance settings
    Get {
        #[arg(long, short = 'i')]
        instance: String,
    },
}

#[derive(Subcommand)]
enum MessageCommand {
    /// Send a text message
    SendText {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, short = 't')]
        text: String,
        #[arg(long, short = 'd', value_name = "MS")]
        delay: Option<u64>,
    },
    /// Send a media message
    SendMedia {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, short = 'm', help = "Media type (image, video, document)")]
        mediatype: String,
        #[arg(long, help = "Media URL")]
        url: String,
        #[arg(long, short = 'c')]
        caption: Option<String>,
        #[arg(long, short = 'f')]
        filename: Option<String>,
        #[arg(long, short = 'd', value_name = "MS")]
        delay: Option<u64>,
    },
    /// Send a video as a round PTV message
    SendPtv {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, help = "Video URL")]
        video: String,
        #[arg(long, short = 'd', value_name = "MS")]
        delay: Option<u64>,
    },
    /// Send a voice-note audio
    SendAudio {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, help = "Audio URL")]
        audio: String,
        #[arg(long, short = 'd', value_name = "MS")]
        delay: Option<u64>,
    },
    /// Publish a status/story
    SendStatus {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long = "type", value_name = "TYPE", help = "Status type (text, image, video, audio)")]
        status_type: String,
        #[arg(long, help = "Text content or media URL")]
        content: String,
        #[arg(long, help = "Send to all contacts")]
        all_contacts: bool,
        #[arg(long, help = "Send only to this status JID")]
        status_jid: Option<String>,
    },
    /// Send a sticker
    SendSticker {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, help = "Sticker URL")]
        sticker: String,
        #[arg(long, short = 'd', value_name = "MS")]
        delay: Option<u64>,
    },
    /// Send a location
    SendLocation {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, help = "Place name")]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        latitude: f64,
        #[arg(long)]
        longitude: f64,
        #[arg(long, short = 'd', value_name = "MS")]
        delay: Option<u64>,
    },
    /// Send a contact card
    SendContact {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        phone_number: String,
        #[arg(long)]
        organization: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// React to a message
    SendReaction {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        remote_jid: String,
        #[arg(long, short = 'm')]
        message_id: String,
        #[arg(long, short = 'r', help = "Reaction emoji")]
        reaction: String,
    },
    /// Send a poll
    SendPoll {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, help = "Poll title")]
        name: String,
        #[arg(long, help = "Comma-separated options")]
        values: String,
        #[arg(long, default_value_t = 1, help = "How many options can be selected")]
        selectable_count: u32,
        #[arg(long, short = 'd', value_name = "MS")]
        delay: Option<u64>,
    },
    /// Send an interactive list
    SendList {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        button_text: String,
        #[arg(long, help = "Sections as `title:row1,row2;title2:row3`")]
        sections: String,
    },
    /// Send interactive reply buttons
    SendButtons {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, help = "Buttons as `label:id,label2:id2`")]
        buttons: String,
    },
}

#[derive(Subcommand)]
enum CallCommand {
    /// Offer a fake call
    Fake {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, help = "Offer a video call instead of voice")]
        is_video: bool,
        #[arg(long, short = 'd', default_value_t = 10, value_name = "SECONDS")]
        duration: u32,
    },
}

#[derive(Subcommand)]
enum ChatCommand {
    /// Check whether numbers are on WhatsApp
    CheckNumber {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n', help = "Comma-separated numbers")]
        numbers: String,
    },
    /// Mark messages as read
    ReadMessages {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        remote_jid: String,
        #[arg(long, short = 'm')]
        message_id: String,
    },
    /// Archive or unarchive a chat
    Archive {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        remote_jid: String,
        #[arg(long, short = 'm')]
        message_id: String,
        #[arg(
            long,
            action = ArgAction::Set,
            default_value_t = true,
            value_name = "BOOL",
            help = "true archives, false unarchives"
        )]
        archive: bool,
    },
    /// Mark a chat as unread
    MarkUnread {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        remote_jid: String,
        #[arg(long, short = 'm')]
        message_id: String,
    },
    /// Delete a message for everyone
    DeleteMessage {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        remote_jid: String,
        #[arg(long, short = 'm')]
        message_id: String,
    },
    /// Fetch a profile picture URL
    GetProfilePic {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
    },
    /// Extract a media message as base64
    GetMediaBase64 {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'm')]
        message_id: String,
        #[arg(long, help = "Convert audio to MP4")]
        convert_to_mp4: bool,
    },
    /// Edit a sent message
    UpdateMessage {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, short = 'j')]
        remote_jid: String,
        #[arg(long, short = 'm')]
        message_id: String,
        #[arg(long, short = 't', help = "New text")]
        text: String,
    },
    /// Send a chat presence (typing, recording, ...)
    SendPresence {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, short = 'p', help = "Presence (available, composing, recording, ...)")]
        presence: String,
        #[arg(long, short = 'd', value_name = "MS")]
        delay: Option<u64>,
    },
    /// Block or unblock a number
    Block {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, short = 's', help = "block or unblock")]
        status: String,
    },
    /// List contacts
    ListContacts {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, help = "Filter by contact ID")]
        contact_id: Option<String>,
    },
    /// List messages in a chat
    ListMessages {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        remote_jid: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        offset: u32,
    },
    /// List status messages
    ListStatus {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        remote_jid: Option<String>,
        #[arg(long, help = "Filter by status ID")]
        status_id: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        offset: u32,
    },
    /// List chats
    ListChats {
        #[arg(long, short = 'i')]
        instance: String,
    },
}

#[derive(Subcommand)]
enum ContactCommand {
    /// Look a contact up in the store (the API has no real add endpoint)
    Add {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, short = 'f')]
        full_name: String,
        #[arg(long)]
        organization: Option<String>,
        #[arg(long, short = 'e')]
        email: Option<String>,
        #[arg(long, short = 'u')]
        url: Option<String>,
    },
}

#[derive(Subcommand)]
enum LabelCommand {
    /// List labels
    List {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Add or remove a label on a chat
    Handle {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, short = 'l')]
        label_id: String,
        #[arg(long, short = 'a', help = "add or remove")]
        action: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Fetch a business profile
    GetBusiness {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
    },
    /// Fetch a profile
    Get {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
    },
    /// Update the profile name
    UpdateName {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        name: String,
    },
    /// Update the profile status text
    UpdateStatus {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 's')]
        status: String,
    },
    /// Update the profile picture
    UpdatePicture {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'p', help = "Picture URL")]
        picture: String,
    },
    /// Remove the profile picture
    RemovePicture {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Show privacy settings
    GetPrivacy {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Update privacy settings
    UpdatePrivacy {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, default_value = "all", help = "Read receipts (all, none)")]
        readreceipts: String,
        #[arg(long, default_value = "all", help = "Profile photo (all, contacts, none)")]
        profile: String,
        #[arg(long, default_value = "contacts", help = "Status (all, contacts, none)")]
        status: String,
        #[arg(long, default_value = "all", help = "Online visibility (all, match_last_seen)")]
        online: String,
        #[arg(long, default_value = "contacts", help = "Last seen (all, contacts, none)")]
        last: String,
        #[arg(long, default_value = "none", help = "Group adds (all, contacts)")]
        groupadd: String,
    },
}

#[derive(Subcommand)]
enum GroupCommand {
    /// Create a group
    Create {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 's', help = "Group name")]
        subject: String,
        #[arg(long, short = 'p', help = "Comma-separated numbers")]
        participants: String,
        #[arg(long, short = 'd')]
        description: Option<String>,
    },
    /// Update the group picture
    UpdatePicture {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
        #[arg(long, help = "Image URL")]
        image: String,
    },
    /// Update the group subject
    UpdateSubject {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
        #[arg(long, short = 's')]
        subject: String,
    },
    /// Update the group description
    UpdateDescription {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
        #[arg(long, short = 'd')]
        description: String,
    },
    /// Fetch the invite code
    GetInvite {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
    },
    /// Revoke the invite code
    RevokeInvite {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
    },
    /// Send the invite to numbers
    SendInvite {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
        #[arg(long, short = 'n', help = "Comma-separated numbers")]
        numbers: String,
        #[arg(long, short = 'd', help = "Invite text")]
        description: Option<String>,
    },
    /// Look a group up by invite code
    GetByInvite {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'c')]
        invite_code: String,
    },
    /// Look a group up by JID
    GetByJid {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
    },
    /// List groups
    List {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, help = "Include the participant lists")]
        get_participants: bool,
    },
    /// List group participants
    ListParticipants {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
    },
    /// Add, remove, promote or demote participants
    ManageParticipants {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
        #[arg(long, short = 'a', help = "add, remove, promote or demote")]
        action: String,
        #[arg(long, short = 'p', help = "Comma-separated numbers")]
        participants: String,
    },
    /// Update group settings
    UpdateSettings {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
        #[arg(
            long,
            short = 'a',
            help = "announcement, not_announcement, locked or unlocked"
        )]
        action: String,
    },
    /// Toggle ephemeral messages
    ToggleEphemeral {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
        #[arg(
            long,
            short = 'e',
            default_value_t = 0,
            help = "Expiration in seconds (0, 86400, 604800, 7776000)"
        )]
        expiration: u64,
    },
    /// Leave the group
    Leave {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'j')]
        group_jid: String,
    },
}

#[derive(Subcommand)]
enum BroadcastCommand {
    /// Validate a number list and announce it (the API has no real
    /// broadcast-list endpoint; nothing is persisted)
    Create {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n', help = "List name")]
        name: String,
        #[arg(long, help = "Comma-separated numbers")]
        numbers: String,
    },
    /// Send a text to each number, sequentially
    Send {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, help = "Comma-separated numbers")]
        numbers: String,
        #[arg(long, short = 't')]
        text: String,
        #[arg(long, short = 'd', value_name = "MS")]
        delay: Option<u64>,
    },
}

#[derive(Subcommand)]
enum IntegrationCommand {
    /// Enable the websocket event stream
    WebsocketSet {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'e', help = "Comma-separated event names")]
        events: String,
    },
    /// Show the websocket configuration
    WebsocketGet {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Enable the RabbitMQ event stream
    RabbitmqSet {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'e', help = "Comma-separated event names")]
        events: String,
    },
    /// Show the RabbitMQ configuration
    RabbitmqGet {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Enable the SQS event stream
    SqsSet {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'e', help = "Comma-separated event names")]
        events: String,
    },
    /// Show the SQS configuration
    SqsGet {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Configure the webhook
    WebhookSet {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'u', help = "Webhook URL")]
        url: String,
        #[arg(long, short = 'e', help = "Comma-separated event names")]
        events: String,
    },
    /// Show the webhook configuration
    WebhookGet {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Configure Chatwoot
    ChatwootSet {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long)]
        account_id: String,
        #[arg(long)]
        token: String,
        #[arg(long, help = "Chatwoot URL")]
        url: String,
        #[arg(long, default_value = "evolution", help = "Inbox name")]
        name_inbox: String,
    },
    /// Show the Chatwoot configuration
    ChatwootGet {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Create a Typebot
    TypebotCreate {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, help = "Typebot URL")]
        url: String,
        #[arg(long, short = 't', help = "Typebot ID")]
        typebot: String,
        #[arg(long, help = "Trigger keyword (regex)")]
        trigger_value: String,
    },
    /// List Typebots
    TypebotList {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Create an OpenAI bot
    OpenaiCreate {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, help = "Credentials ID")]
        creds_id: String,
        #[arg(long, help = "Bot type (assistant, chatCompletion)")]
        bot_type: String,
        #[arg(long)]
        assistant_id: Option<String>,
    },
    /// Create a Dify bot
    DifyCreate {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, help = "Bot type (chatBot, textGenerator, agent, workflow)")]
        bot_type: String,
        #[arg(long)]
        api_url: String,
        #[arg(long)]
        api_key: String,
    },
    /// Create a Flowise bot
    FlowiseCreate {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long)]
        api_url: String,
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Send a template message (Cloud API)
    TemplateSend {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long, short = 'n')]
        number: String,
        #[arg(long, help = "Template name")]
        name: String,
        #[arg(long, default_value = "en_US")]
        language: String,
    },
    /// Create a template (Cloud API)
    TemplateCreate {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long)]
        name: String,
        #[arg(long, help = "MARKETING, UTILITY or AUTHENTICATION")]
        category: String,
        #[arg(long, default_value = "en_US")]
        language: String,
        #[arg(long, help = "Body text")]
        body_text: String,
    },
    /// List templates (Cloud API)
    TemplateList {
        #[arg(long, short = 'i')]
        instance: String,
    },
    /// Fetch media stored in S3
    S3GetMedia {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long)]
        media_id: Option<String>,
    },
    /// Fetch a presigned S3 media URL
    S3GetMediaUrl {
        #[arg(long, short = 'i')]
        instance: String,
        #[arg(long)]
        media_id: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli) {
        eprintln!("{}", format!("Error: {err:#}").red());
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        base_url,
        apikey,
        output,
        command,
    } = cli;

    if let Commands::Completion { shell } = &command {
        let mut cmd = Cli::command();
        let bin = cmd.get_name().to_string();
        generate(*shell, &mut cmd, bin, &mut io::stdout());
        return Ok(());
    }

    let config = config::resolve(base_url, apikey);
    let client = ApiClient::new(&config)?;

    match command {
        Commands::Info => run_table(&client, endpoints::info(), "API Information", output)?,
        Commands::Instance(command) => run_instance(&client, command, output)?,
        Commands::Proxy(command) => match command {
            ProxyCommand::Set {
                instance,
                host,
                port,
                protocol,
                username,
                password,
            } => run_table(
                &client,
                endpoints::proxy_set(
                    &instance,
                    &host,
                    &port,
                    &protocol,
                    username.as_deref(),
                    password.as_deref(),
                ),
                "Proxy Configured",
                output,
            )?,
            ProxyCommand::Get { instance } => run_table(
                &client,
                endpoints::proxy_find(&instance),
                "Proxy Settings",
                output,
            )?,
        },
        Commands::Settings(command) => match command {
            SettingsCommand::Set {
                instance,
                reject_call,
                msg_call,
                groups_ignore,
                always_online,
                read_messages,
                sync_full_history,
                read_status,
            } => run_table(
                &client,
                endpoints::settings_set(
                    &instance,
                    reject_call,
                    groups_ignore,
                    always_online,
                    read_messages,
                    sync_full_history,
                    read_status,
                    msg_call.as_deref(),
                ),
                "Settings Updated",
                output,
            )?,
            SettingsCommand::Get { instance } => run_table(
                &client,
                endpoints::settings_find(&instance),
                "Instance Settings",
                output,
            )?,
        },
        Commands::Message(command) => run_message(&client, command, output)?,
        Commands::Call(CallCommand::Fake {
            instance,
            number,
            is_video,
            duration,
        }) => run_table(
            &client,
            endpoints::call_offer(&instance, &number, is_video, duration),
            "Fake Call Sent",
            output,
        )?,
        Commands::Chat(command) => run_chat(&client, command, output)?,
        Commands::Contact(ContactCommand::Add {
            instance,
            number,
            full_name,
            organization,
            email,
            url,
        }) => run_table(
            &client,
            endpoints::contact_search(
                &instance,
                &number,
                &full_name,
                organization.as_deref(),
                email.as_deref(),
                url.as_deref(),
            ),
            &format!("Contact {full_name} Added"),
            output,
        )?,
        Commands::Label(command) => match command {
            LabelCommand::List { instance } => run_table(
                &client,
                endpoints::find_labels(&instance),
                "Labels",
                output,
            )?,
            LabelCommand::Handle {
                instance,
                number,
                label_id,
                action,
            } => run_table(
                &client,
                endpoints::handle_label(&instance, &number, &label_id, &action),
                "Label Updated",
                output,
            )?,
        },
        Commands::Profile(command) => run_profile(&client, command, output)?,
        Commands::Group(command) => run_group(&client, command, output)?,
        Commands::Broadcast(command) => run_broadcast(&client, command, output)?,
        Commands::Integration(command) => run_integration(&client, command, output)?,
        Commands::Completion { .. } => unreachable!("handled earlier"),
    }

    Ok(())
}

fn run_instance(client: &ApiClient, command: InstanceCommand, output: OutputFormat) -> Result<()> {
    match command {
        InstanceCommand::Create {
            instance,
            qrcode,
            number,
        } => {
            let request = endpoints::instance_create(&instance, qrcode, number.as_deref());
            let response = client.execute(&request)?;
            render::render(&response, &format!("Instance {instance} Created"), output)?;
            if qrcode && let Some(qr) = response.get("qrcode") {
                render::note(&format!("QR Code: {}", render::display_value(qr)));
            }
            Ok(())
        }
        InstanceCommand::List {
            instance,
            instance_id,
        } => run_table(
            client,
            endpoints::instance_list(instance.as_deref(), instance_id.as_deref()),
            "Instances",
            output,
        ),
        InstanceCommand::Connect { instance, number } => run_table(
            client,
            endpoints::instance_connect(&instance, number.as_deref()),
            &format!("Instance {instance} Connection"),
            output,
        ),
        InstanceCommand::Restart { instance } => run_success(
            client,
            endpoints::instance_restart(&instance),
            &format!("Instance {instance} restarted"),
        ),
        InstanceCommand::SetPresence { instance, presence } => run_table(
            client,
            endpoints::instance_set_presence(&instance, &presence),
            "Presence Updated",
            output,
        ),
        InstanceCommand::Status { instance } => run_table(
            client,
            endpoints::instance_connection_state(&instance),
            &format!("Instance {instance} Status"),
            output,
        ),
        InstanceCommand::Logout { instance } => run_success(
            client,
            endpoints::instance_logout(&instance),
            &format!("Instance {instance} logged out"),
        ),
        InstanceCommand::Delete { instance } => run_success(
            client,
            endpoints::instance_delete(&instance),
            &format!("Instance {instance} deleted"),
        ),
    }
}

fn run_message(client: &ApiClient, command: MessageCommand, output: OutputFormat) -> Result<()> {
    match command {
        MessageCommand::SendText {
            instance,
            number,
            text,
            delay,
        } => run_table(
            client,
            endpoints::send_text(&instance, &number, &text, delay),
            "Text Message Sent",
            output,
        ),
        MessageCommand::SendMedia {
            instance,
            number,
            mediatype,
            url,
            caption,
            filename,
            delay,
        } => run_table(
            client,
            endpoints::send_media(
                &instance,
                &number,
                &mediatype,
                &url,
                caption.as_deref(),
                filename.as_deref(),
                delay,
            ),
            "Media Message Sent",
            output,
        ),
        MessageCommand::SendPtv {
            instance,
            number,
            video,
            delay,
        } => run_table(
            client,
            endpoints::send_ptv(&instance, &number, &video, delay),
            "PTV Sent",
            output,
        ),
        MessageCommand::SendAudio {
            instance,
            number,
            audio,
            delay,
        } => run_table(
            client,
            endpoints::send_audio(&instance, &number, &audio, delay),
            "Audio Sent",
            output,
        ),
        MessageCommand::SendStatus {
            instance,
            status_type,
            content,
            all_contacts,
            status_jid,
        } => run_table(
            client,
            endpoints::send_status(
                &instance,
                &status_type,
                &content,
                all_contacts,
                status_jid.as_deref(),
            ),
            "Status Sent",
            output,
        ),
        MessageCommand::SendSticker {
            instance,
            number,
            sticker,
            delay,
        } => run_table(
            client,
            endpoints::send_sticker(&instance, &number, &sticker, delay),
            "Sticker Sent",
            output,
        ),
        MessageCommand::SendLocation {
            instance,
            number,
            name,
            address,
            latitude,
            longitude,
            delay,
        } => run_table(
            client,
            endpoints::send_location(
                &instance, &number, &name, &address, latitude, longitude, delay,
            ),
            "Location Sent",
            output,
        ),
        MessageCommand::SendContact {
            instance,
            number,
            full_name,
            phone_number,
            organization,
            email,
            url,
        } => run_table(
            client,
            endpoints::send_contact(
                &instance,
                &number,
                &full_name,
                &phone_number,
                organization.as_deref(),
                email.as_deref(),
                url.as_deref(),
            ),
            "Contact Sent",
            output,
        ),
        MessageCommand::SendReaction {
            instance,
            remote_jid,
            message_id,
            reaction,
        } => run_table(
            client,
            endpoints::send_reaction(&instance, &remote_jid, &message_id, &reaction),
            "Reaction Sent",
            output,
        ),
        MessageCommand::SendPoll {
            instance,
            number,
            name,
            values,
            selectable_count,
            delay,
        } => run_table(
            client,
            endpoints::send_poll(&instance, &number, &name, &values, selectable_count, delay),
            "Poll Sent",
            output,
        ),
        MessageCommand::SendList {
            instance,
            number,
            title,
            description,
            button_text,
            sections,
        } => run_table(
            client,
            endpoints::send_list(
                &instance,
                &number,
                &title,
                &description,
                &button_text,
                &sections,
            )?,
            "List Sent",
            output,
        ),
        MessageCommand::SendButtons {
            instance,
            number,
            title,
            description,
            buttons,
        } => run_table(
            client,
            endpoints::send_buttons(&instance, &number, &title, &description, &buttons)?,
            "Buttons Sent",
            output,
        ),
    }
}

fn run_chat(client: &ApiClient, command: ChatCommand, output: OutputFormat) -> Result<()> {
    match command {
        ChatCommand::CheckNumber { instance, numbers } => run_table(
            client,
            endpoints::whatsapp_numbers(&instance, endpoints::split_list(&numbers)),
            "Number Check",
            output,
        ),
        ChatCommand::ReadMessages {
            instance,
            remote_jid,
            message_id,
        } => run_table(
            client,
            endpoints::mark_message_read(&instance, &remote_jid, &message_id),
            "Messages Marked as Read",
            output,
        ),
        ChatCommand::Archive {
            instance,
            remote_jid,
            message_id,
            archive,
        } => run_table(
            client,
            endpoints::archive_chat(&instance, &remote_jid, &message_id, archive),
            "Chat Archived",
            output,
        ),
        ChatCommand::MarkUnread {
            instance,
            remote_jid,
            message_id,
        } => run_table(
            client,
            endpoints::mark_chat_unread(&instance, &remote_jid, &message_id),
            "Chat Marked as Unread",
            output,
        ),
        ChatCommand::DeleteMessage {
            instance,
            remote_jid,
            message_id,
        } => run_table(
            client,
            endpoints::delete_message(&instance, &remote_jid, &message_id),
            "Message Deleted",
            output,
        ),
        ChatCommand::GetProfilePic { instance, number } => run_table(
            client,
            endpoints::fetch_profile_picture(&instance, &number),
            "Profile Picture",
            output,
        ),
        ChatCommand::GetMediaBase64 {
            instance,
            message_id,
            convert_to_mp4,
        } => run_table(
            client,
            endpoints::media_base64(&instance, &message_id, convert_to_mp4),
            "Media as Base64",
            output,
        ),
        ChatCommand::UpdateMessage {
            instance,
            number,
            remote_jid,
            message_id,
            text,
        } => run_table(
            client,
            endpoints::update_message(&instance, &number, &remote_jid, &message_id, &text),
            "Message Updated",
            output,
        ),
        ChatCommand::SendPresence {
            instance,
            number,
            presence,
            delay,
        } => run_table(
            client,
            endpoints::send_presence(&instance, &number, &presence, delay),
            "Presence Sent",
            output,
        ),
        ChatCommand::Block {
            instance,
            number,
            status,
        } => {
            let title = format!("Number {}", capitalize(&status));
            run_table(
                client,
                endpoints::update_block_status(&instance, &number, &status),
                &title,
                output,
            )
        }
        ChatCommand::ListContacts {
            instance,
            contact_id,
        } => run_table(
            client,
            endpoints::find_contacts(&instance, contact_id.as_deref()),
            "Contacts",
            output,
        ),
        ChatCommand::ListMessages {
            instance,
            remote_jid,
            page,
            offset,
        } => run_table(
            client,
            endpoints::find_messages(&instance, &remote_jid, page, offset),
            "Messages",
            output,
        ),
        ChatCommand::ListStatus {
            instance,
            remote_jid,
            status_id,
            page,
            offset,
        } => run_table(
            client,
            endpoints::find_status_messages(
                &instance,
                remote_jid.as_deref(),
                status_id.as_deref(),
                page,
                offset,
            ),
            "Status",
            output,
        ),
        ChatCommand::ListChats { instance } => run_table(
            client,
            endpoints::find_chats(&instance),
            "Chats",
            output,
        ),
    }
}

fn run_profile(client: &ApiClient, command: ProfileCommand, output: OutputFormat) -> Result<()> {
    match command {
        ProfileCommand::GetBusiness { instance, number } => run_table(
            client,
            endpoints::fetch_business_profile(&instance, &number),
            "Business Profile",
            output,
        ),
        ProfileCommand::Get { instance, number } => run_table(
            client,
            endpoints::fetch_profile(&instance, &number),
            "Profile",
            output,
        ),
        ProfileCommand::UpdateName { instance, name } => run_table(
            client,
            endpoints::update_profile_name(&instance, &name),
            "Profile Name Updated",
            output,
        ),
        ProfileCommand::UpdateStatus { instance, status } => run_table(
            client,
            endpoints::update_profile_status(&instance, &status),
            "Profile Status Updated",
            output,
        ),
        ProfileCommand::UpdatePicture { instance, picture } => run_table(
            client,
            endpoints::update_profile_picture(&instance, &picture),
            "Profile Picture Updated",
            output,
        ),
        ProfileCommand::RemovePicture { instance } => run_success(
            client,
            endpoints::remove_profile_picture(&instance),
            "Profile picture removed",
        ),
        ProfileCommand::GetPrivacy { instance } => run_table(
            client,
            endpoints::fetch_privacy_settings(&instance),
            "Privacy Settings",
            output,
        ),
        ProfileCommand::UpdatePrivacy {
            instance,
            readreceipts,
            profile,
            status,
            online,
            last,
            groupadd,
        } => run_table(
            client,
            endpoints::update_privacy_settings(
                &instance,
                &readreceipts,
                &profile,
                &status,
                &online,
                &last,
                &groupadd,
            ),
            "Privacy Updated",
            output,
        ),
    }
}

fn run_group(client: &ApiClient, command: GroupCommand, output: OutputFormat) -> Result<()> {
    match command {
        GroupCommand::Create {
            instance,
            subject,
            participants,
            description,
        } => run_table(
            client,
            endpoints::group_create(&instance, &subject, &participants, description.as_deref()),
            "Group Created",
            output,
        ),
        GroupCommand::UpdatePicture {
            instance,
            group_jid,
            image,
        } => run_table(
            client,
            endpoints::group_update_picture(&instance, &group_jid, &image),
            "Group Picture Updated",
            output,
        ),
        GroupCommand::UpdateSubject {
            instance,
            group_jid,
            subject,
        } => run_table(
            client,
            endpoints::group_update_subject(&instance, &group_jid, &subject),
            "Group Subject Updated",
            output,
        ),
        GroupCommand::UpdateDescription {
            instance,
            group_jid,
            description,
        } => run_table(
            client,
            endpoints::group_update_description(&instance, &group_jid, &description),
            "Group Description Updated",
            output,
        ),
        GroupCommand::GetInvite {
            instance,
            group_jid,
        } => run_table(
            client,
            endpoints::group_invite_code(&instance, &group_jid),
            "Invite Code",
            output,
        ),
        GroupCommand::RevokeInvite {
            instance,
            group_jid,
        } => run_table(
            client,
            endpoints::group_revoke_invite(&instance, &group_jid),
            "Invite Code Revoked",
            output,
        ),
        GroupCommand::SendInvite {
            instance,
            group_jid,
            numbers,
            description,
        } => run_table(
            client,
            endpoints::group_send_invite(
                &instance,
                &group_jid,
                &numbers,
                description.as_deref(),
            ),
            "Invite Sent",
            output,
        ),
        GroupCommand::GetByInvite {
            instance,
            invite_code,
        } => run_table(
            client,
            endpoints::group_invite_info(&instance, &invite_code),
            "Group Info",
            output,
        ),
        GroupCommand::GetByJid {
            instance,
            group_jid,
        } => run_table(
            client,
            endpoints::group_find(&instance, &group_jid),
            "Group Info",
            output,
        ),
        GroupCommand::List {
            instance,
            get_participants,
        } => run_table(
            client,
            endpoints::group_fetch_all(&instance, get_participants),
            "Groups",
            output,
        ),
        GroupCommand::ListParticipants {
            instance,
            group_jid,
        } => run_table(
            client,
            endpoints::group_participants(&instance, &group_jid),
            "Group Participants",
            output,
        ),
        GroupCommand::ManageParticipants {
            instance,
            group_jid,
            action,
            participants,
        } => {
            let title = format!("Participants {}", capitalize(&action));
            run_table(
                client,
                endpoints::group_update_participant(&instance, &group_jid, &action, &participants),
                &title,
                output,
            )
        }
        GroupCommand::UpdateSettings {
            instance,
            group_jid,
            action,
        } => run_table(
            client,
            endpoints::group_update_setting(&instance, &group_jid, &action),
            "Group Settings Updated",
            output,
        ),
        GroupCommand::ToggleEphemeral {
            instance,
            group_jid,
            expiration,
        } => run_table(
            client,
            endpoints::group_toggle_ephemeral(&instance, &group_jid, expiration),
            "Ephemeral Messages Updated",
            output,
        ),
        GroupCommand::Leave {
            instance,
            group_jid,
        } => run_success(
            client,
            endpoints::group_leave(&instance, &group_jid),
            "Left the group",
        ),
    }
}

fn run_broadcast(client: &ApiClient, command: BroadcastCommand, output: OutputFormat) -> Result<()> {
    match command {
        BroadcastCommand::Create {
            instance,
            name,
            numbers,
        } => {
            // Only validates the numbers; the wrapped API has no endpoint
            // that would persist a broadcast list.
            let request =
                endpoints::whatsapp_numbers(&instance, endpoints::split_list(&numbers));
            let response = client.execute(&request)?;
            render::render(&response, &format!("Broadcast List {name} Created"), output)?;
            render::note(&format!("List {name} created with numbers: {numbers}"));
            Ok(())
        }
        BroadcastCommand::Send {
            instance,
            numbers,
            text,
            delay,
        } => {
            // One request per recipient, in input order. A failure is
            // reported for its recipient and the loop keeps going.
            for number in numbers.split(',') {
                let number = number.trim();
                let request = endpoints::send_text(&instance, number, &text, delay);
                match client.execute(&request) {
                    Ok(response) => {
                        render::render(&response, &format!("Message Sent to {number}"), output)?;
                    }
                    Err(err) => {
                        eprintln!("{}", format!("Error sending to {number}: {err}").red());
                    }
                }
            }
            Ok(())
        }
    }
}

fn run_integration(
    client: &ApiClient,
    command: IntegrationCommand,
    output: OutputFormat,
) -> Result<()> {
    match command {
        IntegrationCommand::WebsocketSet { instance, events } => run_table(
            client,
            endpoints::event_stream_set("websocket", &instance, &events),
            "WebSocket Configured",
            output,
        ),
        IntegrationCommand::WebsocketGet { instance } => run_table(
            client,
            endpoints::event_stream_find("websocket", &instance),
            "WebSocket Settings",
            output,
        ),
        IntegrationCommand::RabbitmqSet { instance, events } => run_table(
            client,
            endpoints::event_stream_set("rabbitmq", &instance, &events),
            "RabbitMQ Configured",
            output,
        ),
        IntegrationCommand::RabbitmqGet { instance } => run_table(
            client,
            endpoints::event_stream_find("rabbitmq", &instance),
            "RabbitMQ Settings",
            output,
        ),
        IntegrationCommand::SqsSet { instance, events } => run_table(
            client,
            endpoints::event_stream_set("sqs", &instance, &events),
            "SQS Configured",
            output,
        ),
        IntegrationCommand::SqsGet { instance } => run_table(
            client,
            endpoints::event_stream_find("sqs", &instance),
            "SQS Settings",
            output,
        ),
        IntegrationCommand::WebhookSet {
            instance,
            url,
            events,
        } => run_table(
            client,
            endpoints::webhook_set(&instance, &url, &events),
            "Webhook Configured",
            output,
        ),
        IntegrationCommand::WebhookGet { instance } => run_table(
            client,
            endpoints::webhook_find(&instance),
            "Webhook Settings",
            output,
        ),
        IntegrationCommand::ChatwootSet {
            instance,
            account_id,
            token,
            url,
            name_inbox,
        } => run_table(
            client,
            endpoints::chatwoot_set(&instance, &account_id, &token, &url, &name_inbox),
            "Chatwoot Configured",
            output,
        ),
        IntegrationCommand::ChatwootGet { instance } => run_table(
            client,
            endpoints::chatwoot_find(&instance),
            "Chatwoot Settings",
            output,
        ),
        IntegrationCommand::TypebotCreate {
            instance,
            url,
            typebot,
            trigger_value,
        } => run_table(
            client,
            endpoints::typebot_create(&instance, &url, &typebot, &trigger_value),
            "Typebot Created",
            output,
        ),
        IntegrationCommand::TypebotList { instance } => run_table(
            client,
            endpoints::typebot_find(&instance),
            "Typebots",
            output,
        ),
        IntegrationCommand::OpenaiCreate {
            instance,
            creds_id,
            bot_type,
            assistant_id,
        } => run_table(
            client,
            endpoints::openai_create(&instance, &creds_id, &bot_type, assistant_id.as_deref()),
            "OpenAI Bot Created",
            output,
        ),
        IntegrationCommand::DifyCreate {
            instance,
            bot_type,
            api_url,
            api_key,
        } => run_table(
            client,
            endpoints::dify_create(&instance, &bot_type, &api_url, &api_key),
            "Dify Bot Created",
            output,
        ),
        IntegrationCommand::FlowiseCreate {
            instance,
            api_url,
            api_key,
        } => run_table(
            client,
            endpoints::flowise_create(&instance, &api_url, api_key.as_deref()),
            "Flowise Bot Created",
            output,
        ),
        IntegrationCommand::TemplateSend {
            instance,
            number,
            name,
            language,
        } => run_table(
            client,
            endpoints::template_send(&instance, &number, &name, &language),
            "Template Sent",
            output,
        ),
        IntegrationCommand::TemplateCreate {
            instance,
            name,
            category,
            language,
            body_text,
        } => run_table(
            client,
            endpoints::template_create(&instance, &name, &category, &language, &body_text),
            "Template Created",
            output,
        ),
        IntegrationCommand::TemplateList { instance } => run_table(
            client,
            endpoints::template_find(&instance),
            "Templates",
            output,
        ),
        IntegrationCommand::S3GetMedia { instance, media_id } => run_table(
            client,
            endpoints::s3_media(&instance, media_id.as_deref()),
            "S3 Media",
            output,
        ),
        IntegrationCommand::S3GetMediaUrl { instance, media_id } => run_table(
            client,
            endpoints::s3_media_url(&instance, &media_id),
            "S3 Media URL",
            output,
        ),
    }
}

fn run_table(client: &ApiClient, request: Request, title: &str, output: OutputFormat) -> Result<()> {
    let response = client.execute(&request)?;
    render::render(&response, title, output)
}

fn run_success(client: &ApiClient, request: Request, message: &str) -> Result<()> {
    client.execute(&request)?;
    render::success(message);
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
