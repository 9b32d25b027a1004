//! Typed facades, one per backend service.

use crate::rpc::pb::*;
use crate::rpc::{CallContext, RpcClient, RpcError};

macro_rules! rpc_service {
    (
        $(#[$meta:meta])*
        $name:ident, $accessor:ident => $service:literal {
            $( $fn_name:ident($wire:literal, $req:ty) -> $resp:ty; )*
        }
    ) => {
        $(#[$meta])*
        pub struct $name<'a> {
            client: &'a RpcClient,
        }

        impl $name<'_> {
            pub const SERVICE: &'static str = $service;

            $(
                pub async fn $fn_name(
                    &self,
                    ctx: &CallContext,
                    request: &$req,
                ) -> Result<$resp, RpcError> {
                    self.client.invoke(ctx, Self::SERVICE, $wire, request).await
                }
            )*
        }

        impl RpcClient {
            pub fn $accessor(&self) -> $name<'_> {
                $name { client: self }
            }
        }
    };
}

rpc_service! {
    /// Stored gzip configs.
    HttpGzipRpc, http_gzip_rpc => "HTTPGzipService" {
        find_enabled_http_gzip_config("findEnabledHTTPGzipConfig", FindEnabledGzipConfigRequest) -> FindEnabledGzipConfigResponse;
        create_http_gzip("createHTTPGzip", CreateHttpGzipRequest) -> CreateHttpGzipResponse;
        update_http_gzip("updateHTTPGzip", UpdateHttpGzipRequest) -> RpcSuccess;
    }
}

rpc_service! {
    /// Stored websocket configs.
    HttpWebsocketRpc, http_websocket_rpc => "HTTPWebsocketService" {
        create_http_websocket("createHTTPWebsocket", CreateHttpWebsocketRequest) -> CreateHttpWebsocketResponse;
        update_http_websocket("updateHTTPWebsocket", UpdateHttpWebsocketRequest) -> RpcSuccess;
    }
}

rpc_service! {
    /// References stored on web configs.
    HttpWebRpc, http_web_rpc => "HTTPWebService" {
        update_http_web_gzip("updateHTTPWebGzip", UpdateHttpWebGzipRequest) -> RpcSuccess;
        update_http_web_websocket("updateHTTPWebWebsocket", UpdateHttpWebWebsocketRequest) -> RpcSuccess;
    }
}

rpc_service! {
    ServerRpc, server_rpc => "ServerService" {
        find_enabled_server("findEnabledServer", FindEnabledServerRequest) -> FindEnabledServerResponse;
        find_and_init_server_web_config("findAndInitServerWebConfig", FindAndInitServerWebConfigRequest) -> WebConfigResponse;
    }
}

rpc_service! {
    HttpLocationRpc, http_location_rpc => "HTTPLocationService" {
        find_and_init_http_location_web_config("findAndInitHTTPLocationWebConfig", FindAndInitHttpLocationWebConfigRequest) -> WebConfigResponse;
    }
}

rpc_service! {
    NodeClusterRpc, node_cluster_rpc => "NodeClusterService" {
        find_enabled_node_cluster("findEnabledNodeCluster", FindEnabledNodeClusterRequest) -> FindEnabledNodeClusterResponse;
        delete_node_cluster("deleteNodeCluster", DeleteNodeClusterRequest) -> RpcSuccess;
    }
}

rpc_service! {
    /// Node records, logins and installation.
    NodeRpc, node_rpc => "NodeService" {
        count_all_enabled_nodes_match("countAllEnabledNodesMatch", CountAllEnabledNodesMatchRequest) -> RpcCountResponse;
        list_enabled_nodes_match("listEnabledNodesMatch", ListEnabledNodesMatchRequest) -> NodeListResponse;
        find_all_not_installed_nodes_with_node_cluster_id("findAllNotInstalledNodesWithNodeClusterId", FindAllNotInstalledNodesWithNodeClusterIdRequest) -> NodeListResponse;
        find_enabled_node("findEnabledNode", FindEnabledNodeRequest) -> FindEnabledNodeResponse;
        create_node("createNode", CreateNodeRequest) -> CreateNodeResponse;
        update_node("updateNode", UpdateNodeRequest) -> RpcSuccess;
        update_node_login("updateNodeLogin", UpdateNodeLoginRequest) -> RpcSuccess;
        install_node("installNode", InstallNodeRequest) -> RpcSuccess;
        find_node_install_status("findNodeInstallStatus", FindNodeInstallStatusRequest) -> FindNodeInstallStatusResponse;
        update_node_is_installed("updateNodeIsInstalled", UpdateNodeIsInstalledRequest) -> RpcSuccess;
    }
}

rpc_service! {
    NodeIpAddressRpc, node_ip_address_rpc => "NodeIPAddressService" {
        create_node_ip_address("createNodeIPAddress", CreateNodeIpAddressRequest) -> CreateNodeIpAddressResponse;
        update_node_ip_address("updateNodeIPAddress", UpdateNodeIpAddressRequest) -> RpcSuccess;
    }
}

rpc_service! {
    NodeLogRpc, node_log_rpc => "NodeLogService" {
        count_node_logs("countNodeLogs", CountNodeLogsRequest) -> RpcCountResponse;
        list_node_logs("listNodeLogs", ListNodeLogsRequest) -> ListNodeLogsResponse;
    }
}

rpc_service! {
    /// Operation log sink.
    LogRpc, log_rpc => "LogService" {
        create_log("createLog", CreateLogRequest) -> RpcSuccess;
    }
}
