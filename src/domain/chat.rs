//! Chat memory management payloads

use serde::Serialize;

/// JSON body of `POST /api/chat/manage`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChatManageBody {
    pub reset_memory: bool,
    pub clear_chat: bool,
}

/// Query half of `POST /api/chat/manage`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatManageQuery {
    pub user_id: String,
    pub remove_chunks: bool,
    pub remove_embeddings: bool,
    pub remove_query_response: bool,
    pub reseting: bool,
}

impl ChatManageQuery {
    /// Query pairs in wire order, booleans as `true`/`false`
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("user_id".to_string(), self.user_id.trim().to_string()),
            ("remove_chunks".to_string(), self.remove_chunks.to_string()),
            (
                "remove_embeddings".to_string(),
                self.remove_embeddings.to_string(),
            ),
            (
                "remove_query_response".to_string(),
                self.remove_query_response.to_string(),
            ),
            ("reseting".to_string(), self.reseting.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let query = ChatManageQuery {
            user_id: " u-1 ".to_string(),
            remove_chunks: true,
            ..Default::default()
        };
        let pairs = query.to_pairs();

        assert_eq!(pairs[0], ("user_id".to_string(), "u-1".to_string()));
        assert_eq!(pairs[1], ("remove_chunks".to_string(), "true".to_string()));
        assert_eq!(pairs[4], ("reseting".to_string(), "false".to_string()));
    }
}
