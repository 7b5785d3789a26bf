use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chat Session Service",
        description = "Conversation-initialization handshake: identity resolution, profile authorization, daily usage ledger and session credential issuance."
    ),
    paths(crate::routes::sessions::create_chat_session),
    components(schemas(
        crate::routes::sessions::CreateSessionRequest,
        crate::routes::sessions::CreateSessionResponse,
    )),
    tags((name = "chat", description = "Conversation session handshake"))
)]
pub struct ApiDoc;
