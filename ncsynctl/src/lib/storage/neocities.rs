use ncsync::{config::Credentials, path::RelativePath, Config, Info, RemoteEntry, UploadEntry};
use reqwest::multipart;
use url::Url;

/// A remote directory backed by the Neocities web API
#[derive(Clone)]
pub struct Neocities {
    client: reqwest::Client,
    base_url: Url,
    user_agent: String,
    credentials: Credentials,
}

impl Neocities {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        log::debug!(
            "Initializing Neocities storage for {} at {}",
            config.credentials.username,
            config.api_url
        );
        Neocities {
            client,
            base_url: config.api_url.clone(),
            user_agent: ncsync::user_agent(),
            credentials: config.credentials.clone(),
        }
    }
}

impl super::List for Neocities {
    async fn list(&self) -> ncsync::Result<Vec<RemoteEntry>> {
        log::trace!("listing remote files");
        let reply: api::FileList = self.get("list").await?;
        log::debug!("{} remote entries", reply.files.len());
        Ok(reply.files)
    }
}

impl super::Upload for Neocities {
    async fn upload(&self, entries: &[UploadEntry]) -> ncsync::Result<()> {
        if entries.is_empty() {
            log::debug!("nothing to upload");
            return Ok(());
        }
        // field names are remote paths and keep their separators
        let mut form = multipart::Form::new().percent_encode_noop();
        for entry in entries {
            log::info!("uploading {}", entry.name);
            let part = utils::file_part(entry).await?;
            form = form.part(entry.name.to_string(), part);
        }
        let _: api::Ack = self.post_multipart("upload", form).await?;
        Ok(())
    }
}

impl super::Delete for Neocities {
    async fn delete(&self, paths: &[RelativePath]) -> ncsync::Result<()> {
        debug_assert!(!paths.is_empty(), "delete called without paths");
        for path in paths {
            log::info!("deleting {path}");
        }
        // the API names directories without their trailing separator
        let form: Vec<(&str, &str)> = paths
            .iter()
            .map(|path| ("filenames[]", path.without_marker()))
            .collect();
        let _: api::Ack = self.post_form("delete", &form).await?;
        Ok(())
    }
}

impl super::AccountInfo for Neocities {
    async fn info(&self) -> ncsync::Result<Info> {
        let reply: api::InfoReply = self.get("info").await?;
        Ok(reply.info)
    }
}

impl super::RemoteDir for Neocities {}

mod api {
    use ncsync::{Info, RemoteEntry};
    use serde::Deserialize;

    pub const SUCCESS: &str = "success";

    /// Fields common to every reply
    #[derive(Debug, Clone, Deserialize)]
    pub struct Status {
        pub result: String,
        pub error_type: Option<String>,
        pub message: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Ack {
        #[allow(dead_code)]
        pub message: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct FileList {
        pub files: Vec<RemoteEntry>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct InfoReply {
        pub info: Info,
    }
}

mod utils {
    use ncsync::{api_bail, api_error, io_error, UploadEntry};
    use reqwest::{header, multipart, Response, StatusCode, Url};
    use serde::{de::DeserializeOwned, Serialize};
    use tokio_util::io::ReaderStream;

    use super::{api, Neocities};

    impl Neocities {
        fn endpoint_url(&self, endpoint: &str) -> ncsync::Result<Url> {
            let url = format!("{}/{endpoint}", self.base_url.as_str().trim_end_matches('/'));
            Url::parse(&url).map_err(|err| api_error!("Invalid endpoint URL {url}: {err}"))
        }

        fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
            self.client
                .request(method, url)
                .header(header::USER_AGENT, &self.user_agent)
                .basic_auth(
                    &self.credentials.username,
                    Some(&self.credentials.password),
                )
        }

        pub async fn get<T>(&self, endpoint: &str) -> ncsync::Result<T>
        where
            T: DeserializeOwned,
        {
            let url = self.endpoint_url(endpoint)?;
            let res = self
                .request(reqwest::Method::GET, url)
                .send()
                .await
                .map_err(|err| api_error!("GET /{endpoint} failed: {err}"))?;
            check_reply("GET", endpoint, res).await
        }

        pub async fn post_form<T, F>(&self, endpoint: &str, form: &F) -> ncsync::Result<T>
        where
            T: DeserializeOwned,
            F: Serialize + ?Sized,
        {
            let url = self.endpoint_url(endpoint)?;
            let res = self
                .request(reqwest::Method::POST, url)
                .form(form)
                .send()
                .await
                .map_err(|err| api_error!("POST /{endpoint} failed: {err}"))?;
            check_reply("POST", endpoint, res).await
        }

        pub async fn post_multipart<T>(
            &self,
            endpoint: &str,
            form: multipart::Form,
        ) -> ncsync::Result<T>
        where
            T: DeserializeOwned,
        {
            let url = self.endpoint_url(endpoint)?;
            let res = self
                .request(reqwest::Method::POST, url)
                .multipart(form)
                .send()
                .await
                .map_err(|err| api_error!("POST /{endpoint} failed: {err}"))?;
            check_reply("POST", endpoint, res).await
        }
    }

    pub async fn file_part(entry: &UploadEntry) -> ncsync::Result<multipart::Part> {
        let file = tokio::fs::File::open(&entry.source)
            .await
            .map_err(|err| io_error!("Can't read {}: {err}", entry.source))?;
        let len = file.metadata().await?.len();
        let file_name = entry.source.file_name().unwrap_or(entry.name.as_str());
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
        Ok(multipart::Part::stream_with_length(body, len).file_name(file_name.to_string()))
    }

    pub async fn check_reply<T>(method: &str, endpoint: &str, res: Response) -> ncsync::Result<T>
    where
        T: DeserializeOwned,
    {
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| api_error!("{method} /{endpoint}: could not read reply: {err}"))?;
        parse_reply(method, endpoint, status, &body)
    }

    /// Check the `result` field of a reply and deserialize the payload.
    pub fn parse_reply<T>(
        method: &str,
        endpoint: &str,
        status: StatusCode,
        body: &str,
    ) -> ncsync::Result<T>
    where
        T: DeserializeOwned,
    {
        let value: serde_json::Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) => {
                log::error!("{method} /{endpoint} returned {status}\n{body}");
                api_bail!("Error interacting with Neocities' API: {method} /{endpoint} returned {status}");
            }
        };
        let reply: api::Status = serde_json::from_value(value.clone()).map_err(|err| {
            log::error!("{value}");
            api_error!("Error interacting with Neocities' API: {method} /{endpoint}: {err}")
        })?;
        if reply.result != api::SUCCESS {
            log::error!("{value}");
            let error_type = reply.error_type.as_deref().unwrap_or("unknown_error");
            let message = reply.message.as_deref().unwrap_or("no message");
            api_bail!(
                "Error interacting with Neocities' API: {method} /{endpoint} returned {status}: {message} ({error_type})"
            );
        }
        serde_json::from_value(value).map_err(|err| {
            api_error!("Error interacting with Neocities' API: {method} /{endpoint}: {err}")
        })
    }
}
