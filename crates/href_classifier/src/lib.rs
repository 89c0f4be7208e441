use toc_collaborators::UrlClassifier;
use toc_model::{TocHrefKind, UrlKind, RESERVED_TOC_NAMES};

/// Classifies a raw href string into a [`TocHrefKind`] (§4.1).
pub fn classify(href: &str, url_classifier: &dyn UrlClassifier) -> TocHrefKind {
    if href.is_empty() {
        return TocHrefKind::None;
    }

    match url_classifier.classify_url(href) {
        UrlKind::AbsolutePath | UrlKind::External => return TocHrefKind::AbsolutePath,
        UrlKind::RelativePath => {}
    }

    let path_only = strip_query_and_fragment(href);

    if path_only.ends_with('/') || path_only.ends_with('\\') {
        return TocHrefKind::RelativeFolder;
    }

    match final_segment(path_only) {
        Some(segment) if is_reserved_toc_name(segment) => TocHrefKind::TocFile,
        _ => TocHrefKind::RelativeFile,
    }
}

fn strip_query_and_fragment(href: &str) -> &str {
    let end = href
        .find(['?', '#'])
        .unwrap_or(href.len());
    &href[..end]
}

fn final_segment(path: &str) -> Option<&str> {
    path.rsplit(['/', '\\']).next().filter(|s| !s.is_empty())
}

fn is_reserved_toc_name(segment: &str) -> bool {
    RESERVED_TOC_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(segment))
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FakeUrlClassifier(UrlKind);
    impl UrlClassifier for FakeUrlClassifier {
        fn classify_url(&self, _href: &str) -> UrlKind {
            self.0
        }
    }

    fn relative() -> FakeUrlClassifier {
        FakeUrlClassifier(UrlKind::RelativePath)
    }

    #[test]
    fn empty_href_is_none() {
        assert_eq!(classify("", &relative()), TocHrefKind::None);
    }

    #[test]
    fn external_link_is_absolute() {
        let ext = FakeUrlClassifier(UrlKind::External);
        assert_eq!(
            classify("https://example.com/x", &ext),
            TocHrefKind::AbsolutePath
        );
    }

    #[test]
    fn absolute_path_link_is_absolute() {
        let abs = FakeUrlClassifier(UrlKind::AbsolutePath);
        assert_eq!(classify("/docs/x.md", &abs), TocHrefKind::AbsolutePath);
    }

    #[test]
    fn trailing_slash_is_relative_folder() {
        assert_eq!(classify("sub/", &relative()), TocHrefKind::RelativeFolder);
    }

    #[test]
    fn trailing_backslash_is_relative_folder() {
        assert_eq!(classify("sub\\", &relative()), TocHrefKind::RelativeFolder);
    }

    #[test]
    fn reserved_toc_name_is_toc_file() {
        assert_eq!(classify("sub/TOC.yml", &relative()), TocHrefKind::TocFile);
        assert_eq!(classify("toc.YML", &relative()), TocHrefKind::TocFile);
        assert_eq!(
            classify("TOC.experimental.json", &relative()),
            TocHrefKind::TocFile
        );
    }

    #[test]
    fn ordinary_file_is_relative_file() {
        assert_eq!(classify("a.md", &relative()), TocHrefKind::RelativeFile);
    }

    #[test]
    fn query_and_fragment_are_ignored_for_classification() {
        assert_eq!(
            classify("sub/TOC.yml?foo=bar#frag", &relative()),
            TocHrefKind::TocFile
        );
        assert_eq!(classify("sub/?x=1", &relative()), TocHrefKind::RelativeFolder);
    }
}
