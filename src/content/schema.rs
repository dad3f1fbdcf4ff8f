//! Front matter schemas for the `authors` and `blog` collections.
//!
//! Keys are camelCase. Keys not listed here are ignored.

use crate::utils::date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, de::DeserializeOwned};

/// A record type that can be loaded from front matter.
pub trait Schema: DeserializeOwned + Send {
    /// Collection name used in ids, references and error messages.
    const COLLECTION: &'static str;

    /// Checks serde cannot express. Returns the offending field and reason.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Author profile (`authors` collection).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    pub name: String,
    pub bio: String,
    pub avatar: String,
    #[serde(default)]
    pub social: Option<Social>,
}

/// Social profile links of an author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Social {
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub medium: Option<String>,
}

impl Schema for Author {
    const COLLECTION: &'static str = "authors";
}

/// Blog post (`blog` collection).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "date::deserialize")]
    pub publish_date: DateTime<Utc>,
    /// Author ids, resolved against the `authors` collection.
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub featured: bool,

    /// Canonical location of an article published elsewhere.
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "date::deserialize_opt")]
    pub original_publish_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub youtube_url: Option<String>,
}

impl Schema for BlogPost {
    const COLLECTION: &'static str = "blog";

    fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("externalUrl", &self.external_url),
            ("youtubeUrl", &self.youtube_url),
        ] {
            if let Some(value) = value
                && let Err(err) = url::Url::parse(value)
            {
                return Err(format!("{field}: invalid url `{value}` ({err})"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(yaml: &str) -> BlogPost {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    const MINIMAL_POST: &str = "
title: Hello
description: First post
publishDate: 2024-03-05
authors: [jane]
tags: [news]
";

    #[test]
    fn test_post_defaults() {
        let post = post(MINIMAL_POST);
        assert_eq!(post.title, "Hello");
        assert_eq!(
            post.publish_date,
            Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
        );
        assert_eq!(post.authors, vec!["jane"]);
        assert!(!post.draft);
        assert!(!post.featured);
        assert_eq!(post.image, None);
        assert_eq!(post.original_publish_date, None);
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_post_full() {
        let post = post(
            "
title: Talk
description: A recorded talk
publishDate: 2024-03-05T10:00:00Z
authors: [jane, sam]
tags: []
image: /img/talk.png
draft: true
featured: true
externalUrl: https://example.com/talk
source: Example Conf
originalPublishDate: 1709596800000
youtubeUrl: https://www.youtube.com/watch?v=abc
",
        );
        assert!(post.draft);
        assert!(post.featured);
        assert_eq!(post.source.as_deref(), Some("Example Conf"));
        assert_eq!(
            post.original_publish_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap())
        );
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_post_ignores_unknown_keys() {
        let post = post(&format!("{MINIMAL_POST}layout: wide\n"));
        assert_eq!(post.title, "Hello");
    }

    #[test]
    fn test_post_missing_required_field() {
        let err = serde_yaml_ng::from_str::<BlogPost>("title: Hello\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing field"));
    }

    #[test]
    fn test_post_rejects_bad_date() {
        let yaml = MINIMAL_POST.replace("2024-03-05", "someday");
        let err = serde_yaml_ng::from_str::<BlogPost>(&yaml)
            .unwrap_err()
            .to_string();
        assert!(err.contains("invalid date `someday`"));
    }

    #[test]
    fn test_post_rejects_invalid_urls() {
        let external = post(&format!("{MINIMAL_POST}externalUrl: not a url\n"));
        let err = external.validate().unwrap_err();
        assert!(err.starts_with("externalUrl:"));

        let video = post(&format!("{MINIMAL_POST}youtubeUrl: youtube\n"));
        assert!(video.validate().unwrap_err().starts_with("youtubeUrl:"));
    }

    #[test]
    fn test_author_social_optional() {
        let author: Author =
            serde_yaml_ng::from_str("name: Jane\nbio: Writes things\navatar: /jane.png\n")
                .unwrap();
        assert_eq!(author.social, None);

        let author: Author = serde_yaml_ng::from_str(
            "name: Jane\nbio: b\navatar: a\nsocial:\n  github: jane\n",
        )
        .unwrap();
        let social = author.social.unwrap();
        assert_eq!(social.github.as_deref(), Some("jane"));
        assert_eq!(social.twitter, None);
    }
}
