//! Request and response messages of the management backend.
//!
//! Field names follow the backend's camelCase wire names. Fields carrying
//! an embedded JSON document keep the backend's `...JSON` suffix.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serverconfigs::SizeCapacity;

/// Empty response of calls that only report success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcSuccess {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RpcCountResponse {
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Web configs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindAndInitServerWebConfigRequest {
    pub server_id: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindAndInitHttpLocationWebConfigRequest {
    pub location_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebConfigResponse {
    #[serde(rename = "webJSON")]
    pub web_json: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindEnabledServerRequest {
    pub server_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerBasic {
    pub id: i64,
    pub name: String,
    pub is_on: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FindEnabledServerResponse {
    pub server: Option<ServerBasic>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindEnabledGzipConfigRequest {
    pub gzip_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FindEnabledGzipConfigResponse {
    #[serde(rename = "gzipJSON")]
    pub gzip_json: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHttpGzipRequest {
    pub level: i32,
    pub min_length: SizeCapacity,
    pub max_length: SizeCapacity,
    #[serde(rename = "condsJSON")]
    pub conds_json: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateHttpGzipResponse {
    pub gzip_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHttpGzipRequest {
    pub gzip_id: i64,
    pub level: i32,
    pub min_length: SizeCapacity,
    pub max_length: SizeCapacity,
    #[serde(rename = "condsJSON")]
    pub conds_json: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHttpWebGzipRequest {
    pub web_id: i64,
    #[serde(rename = "gzipJSON")]
    pub gzip_json: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHttpWebsocketRequest {
    #[serde(rename = "handshakeTimeoutJSON")]
    pub handshake_timeout_json: Value,
    pub allow_all_origins: bool,
    pub allowed_origins: Vec<String>,
    pub request_same_origin: bool,
    pub request_origin: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateHttpWebsocketResponse {
    pub websocket_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHttpWebsocketRequest {
    pub websocket_id: i64,
    #[serde(rename = "handshakeTimeoutJSON")]
    pub handshake_timeout_json: Value,
    pub allow_all_origins: bool,
    pub allowed_origins: Vec<String>,
    pub request_same_origin: bool,
    pub request_origin: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHttpWebWebsocketRequest {
    pub web_id: i64,
    #[serde(rename = "websocketJSON")]
    pub websocket_json: Value,
}

// ---------------------------------------------------------------------------
// Clusters and nodes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeCluster {
    pub id: i64,
    pub name: String,
    pub is_on: bool,
    pub install_dir: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindEnabledNodeClusterRequest {
    pub node_cluster_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindEnabledNodeClusterResponse {
    pub node_cluster: Option<NodeCluster>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNodeClusterRequest {
    pub node_cluster_id: i64,
}

/// SSH parameters of a node login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SshLoginParams {
    pub grant_id: i64,
    pub host: String,
    pub port: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeLogin {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub login_type: String,
    #[serde(rename = "paramsJSON")]
    pub params: SshLoginParams,
}

impl NodeLogin {
    pub fn ssh(id: i64, params: SshLoginParams) -> Self {
        Self {
            id,
            name: "SSH".to_string(),
            login_type: "ssh".to_string(),
            params,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeIpAddress {
    pub id: i64,
    pub name: String,
    pub ip: String,
    pub can_access: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeInstallStatus {
    pub is_running: bool,
    pub is_finished: bool,
    pub is_ok: bool,
    pub error: String,
    pub error_code: String,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    pub id: i64,
    pub name: String,
    pub is_on: bool,
    pub is_installed: bool,
    pub install_status: Option<NodeInstallStatus>,
    pub node_cluster: Option<NodeCluster>,
    #[serde(rename = "ipAddresses")]
    pub ip_addresses: Vec<NodeIpAddress>,
    pub node_login: Option<NodeLogin>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountAllEnabledNodesMatchRequest {
    pub node_cluster_id: i64,
    pub install_state: i32,
    pub active_state: i32,
    pub keyword: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnabledNodesMatchRequest {
    pub offset: i64,
    pub size: i64,
    pub node_cluster_id: i64,
    pub install_state: i32,
    pub active_state: i32,
    pub keyword: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeListResponse {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindAllNotInstalledNodesWithNodeClusterIdRequest {
    pub node_cluster_id: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallNodeRequest {
    pub node_id: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindNodeInstallStatusRequest {
    pub node_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindNodeInstallStatusResponse {
    pub install_status: Option<NodeInstallStatus>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeIsInstalledRequest {
    pub node_id: i64,
    pub is_installed: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
    pub name: String,
    pub node_cluster_id: i64,
    pub node_login: Option<NodeLogin>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateNodeResponse {
    pub node_id: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindEnabledNodeRequest {
    pub node_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FindEnabledNodeResponse {
    pub node: Option<Node>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeRequest {
    pub node_id: i64,
    pub name: String,
    pub node_cluster_id: i64,
    pub is_on: bool,
    pub node_login: Option<NodeLogin>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeLoginRequest {
    pub node_id: i64,
    pub node_login: NodeLogin,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeIpAddressRequest {
    pub node_id: i64,
    pub name: String,
    pub ip: String,
    pub can_access: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateNodeIpAddressResponse {
    #[serde(rename = "nodeIPAddressId")]
    pub node_ip_address_id: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeIpAddressRequest {
    #[serde(rename = "nodeIPAddressId")]
    pub node_ip_address_id: i64,
    pub name: String,
    pub ip: String,
    pub can_access: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeLog {
    pub id: i64,
    pub level: String,
    pub tag: String,
    pub description: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountNodeLogsRequest {
    pub role: String,
    pub node_id: i64,
    pub day_from: String,
    pub day_to: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNodeLogsRequest {
    pub role: String,
    pub node_id: i64,
    pub day_from: String,
    pub day_to: String,
    pub level: String,
    pub offset: i64,
    pub size: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListNodeLogsResponse {
    pub node_logs: Vec<NodeLog>,
}

// ---------------------------------------------------------------------------
// Operation logs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogRequest {
    pub level: String,
    pub description: String,
    pub action: String,
    pub ip: String,
}
