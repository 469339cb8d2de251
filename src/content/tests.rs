//! Content Module Tests
//!
//! Exercises both `ContentService` implementations and the HTTP gateway in front of them.
//!
//! ## Test Scopes
//! - **Local**: Reads and writes against one directory.
//! - **Router**: Blobs land on the ring owner, and a freshly published ring is honoured
//!   by the next call.
//! - **Lazy start**: The ring and the admin service come up on first use, once.
//! - **Gateway**: `/content/<object_id>/<filename>` over HTTP.

#[cfg(test)]
mod tests {
    use crate::config::RouterSettings;
    use crate::content::{ContentRouter, ContentService, LocalContentService, handlers};
    use crate::error::ContentError;
    use crate::ring::Ring;
    use crate::storage::ObjectKey;
    use crate::testing::{TestNode, spawn_nodes};
    use bytes::Bytes;
    use reqwest::StatusCode;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::net::TcpListener;

    fn routed(nodes: &[TestNode]) -> ContentRouter {
        let members = nodes.iter().map(|node| node.address.clone()).collect();
        ContentRouter::new(RouterSettings::new("127.0.0.1:0", members))
    }

    // ============================================================
    // LOCAL SERVICE
    // ============================================================

    #[tokio::test]
    async fn test_local_write_then_read() {
        let dir = TempDir::new().unwrap();
        let service = LocalContentService::new(dir.path()).unwrap();

        service
            .write("video-1", "manifest.mpd", Bytes::from_static(b"<MPD/>"))
            .await
            .unwrap();

        assert_eq!(
            service.read("video-1", "manifest.mpd").await.unwrap(),
            Some(Bytes::from_static(b"<MPD/>"))
        );
        assert_eq!(service.read("video-1", "other.mpd").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_local_rejects_invalid_key() {
        let dir = TempDir::new().unwrap();
        let service = LocalContentService::new(dir.path()).unwrap();

        let err = service.read("..", "passwd").await.unwrap_err();
        assert!(matches!(err, ContentError::InvalidKey { .. }));
    }

    // ============================================================
    // ROUTER
    // ============================================================

    #[tokio::test]
    async fn test_router_writes_land_on_owner() {
        let nodes = spawn_nodes(3).await;
        let router = routed(&nodes);

        for i in 0..30 {
            let filename = format!("seg_{:02}.m4s", i);
            router
                .write("video-7", &filename, Bytes::from(filename.clone()))
                .await
                .unwrap();

            let key = ObjectKey::new("video-7", filename.as_str()).unwrap();
            let owner = router.owner_of(&key).await.unwrap();
            for node in &nodes {
                let held = node.backend.read(&key).await.unwrap().is_some();
                assert_eq!(held, node.address == owner, "{} on {}", key, node.address);
            }

            assert_eq!(
                router.read("video-7", &filename).await.unwrap(),
                Some(Bytes::from(filename.clone()))
            );
        }
    }

    #[tokio::test]
    async fn test_router_read_absent_is_none() {
        let nodes = spawn_nodes(2).await;
        let router = routed(&nodes);

        assert_eq!(router.read("video-1", "missing.m4s").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_router_honours_newly_published_ring() {
        let nodes = spawn_nodes(3).await;
        let router = routed(&nodes[..2]);
        router.start().await.unwrap();

        router
            .write("video-1", "init.mp4", Bytes::from_static(b"old"))
            .await
            .unwrap();

        // Swap in a ring that only knows the third node.
        router
            .ring()
            .publish(Ring::build(&[nodes[2].address.as_str()]).unwrap())
            .await;

        assert_eq!(router.read("video-1", "init.mp4").await.unwrap(), None);

        router
            .write("video-1", "init.mp4", Bytes::from_static(b"new"))
            .await
            .unwrap();
        let key = ObjectKey::new("video-1", "init.mp4").unwrap();
        assert_eq!(
            nodes[2].backend.read(&key).await.unwrap(),
            Some(Bytes::from_static(b"new"))
        );
    }

    #[tokio::test]
    async fn test_router_without_nodes_is_unavailable() {
        let router = ContentRouter::new(RouterSettings::new("127.0.0.1:0", vec![]));

        let err = router.read("video-1", "init.mp4").await.unwrap_err();
        assert!(matches!(err, ContentError::RoutingUnavailable));
        assert!(router.admin_addr().is_none());
    }

    #[tokio::test]
    async fn test_router_unreachable_owner_is_transport_failure() {
        let router = ContentRouter::new(RouterSettings::new(
            "127.0.0.1:0",
            vec![crate::testing::dead_address().await],
        ));

        let err = router
            .write("video-1", "init.mp4", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Transport { .. }));
    }

    // ============================================================
    // LAZY START
    // ============================================================

    #[tokio::test]
    async fn test_router_starts_on_first_use() {
        let nodes = spawn_nodes(1).await;
        let router = routed(&nodes);
        assert!(router.admin_addr().is_none());

        router.read("video-1", "manifest.mpd").await.unwrap();

        let started = router.admin_addr().unwrap();
        assert_ne!(started.port(), 0);
    }

    #[tokio::test]
    async fn test_router_start_is_idempotent() {
        let nodes = spawn_nodes(2).await;
        let router = routed(&nodes);

        let other = router.clone();
        let (first, second) = tokio::join!(router.start(), other.start());
        let first = first.unwrap();
        assert_eq!(first, second.unwrap());
        assert_eq!(router.start().await.unwrap(), first);
    }

    // ============================================================
    // GATEWAY
    // ============================================================

    async fn serve_gateway(service: Arc<dyn ContentService>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        let app = handlers::router(service);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        address
    }

    #[tokio::test]
    async fn test_gateway_put_then_get() {
        let dir = TempDir::new().unwrap();
        let service = Arc::new(LocalContentService::new(dir.path()).unwrap());
        let gateway = serve_gateway(service).await;
        let http = reqwest::Client::new();

        let url = format!("http://{}/content/video-3/dash/manifest.mpd", gateway);
        let put = http.put(&url).body("<MPD/>").send().await.unwrap();
        assert_eq!(put.status(), StatusCode::OK);

        let get = http.get(&url).send().await.unwrap();
        assert_eq!(get.status(), StatusCode::OK);
        assert_eq!(
            get.headers()[reqwest::header::CONTENT_TYPE],
            "application/dash+xml"
        );
        assert_eq!(get.bytes().await.unwrap(), Bytes::from_static(b"<MPD/>"));
    }

    #[tokio::test]
    async fn test_gateway_missing_content_is_404() {
        let nodes = spawn_nodes(2).await;
        let gateway = serve_gateway(Arc::new(routed(&nodes))).await;

        let response = reqwest::get(format!("http://{}/content/video-3/seg_01.m4s", gateway))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
