use std::sync::Arc;

use tokio::sync::RwLock;

use gatehouse_core::{Email, EmailClient};

/// An email a [`MockEmailClient`] accepted for delivery.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

/// Email client that delivers nowhere and remembers everything, so tests
/// can read the mail the service sent.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_str().to_owned(),
            subject: subject.to_owned(),
            content: content.to_owned(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sent_mail_is_recorded_in_order() {
        let client = MockEmailClient::new();
        let recipient = Email::parse("alice@example.com").unwrap();

        client
            .send_email(&recipient, "first", "hello")
            .await
            .unwrap();
        client
            .send_email(&recipient, "second", "again")
            .await
            .unwrap();

        let sent = client.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].subject, "first");
        assert_eq!(sent[1].subject, "second");
        assert_eq!(sent[0].recipient, "alice@example.com");
    }
}
