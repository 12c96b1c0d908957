pub mod list {
    use lazy_static::lazy_static;
    use scraper::Selector;

    lazy_static! {
        pub static ref ARTICLE: Selector =
            Selector::parse(".list-content__item, .listfeed__item, article, .search-result__item").unwrap();
        pub static ref TITLE: [Selector; 5] = [
            Selector::parse(".media__title").unwrap(),
            Selector::parse(".title").unwrap(),
            Selector::parse("h2").unwrap(),
            Selector::parse("h3").unwrap(),
            Selector::parse("a").unwrap(),
        ];
        pub static ref TIME: [Selector; 3] = [
            Selector::parse(".media__date").unwrap(),
            Selector::parse(".date").unwrap(),
            Selector::parse("time").unwrap(),
        ];
        pub static ref EXCERPT: [Selector; 4] = [
            Selector::parse(".media__desc").unwrap(),
            Selector::parse(".desc").unwrap(),
            Selector::parse(".excerpt").unwrap(),
            Selector::parse("p").unwrap(),
        ];
        pub static ref LINK: Selector = Selector::parse("a").unwrap();
        pub static ref IMAGE: Selector = Selector::parse("img").unwrap();
    }
}

pub mod article {
    use lazy_static::lazy_static;
    use scraper::Selector;

    lazy_static! {
        pub static ref OG_IMAGE: [Selector; 2] = [
            Selector::parse(r#"meta[property="og:image"]"#).unwrap(),
            Selector::parse(r#"meta[name="og:image"]"#).unwrap(),
        ];
        pub static ref CONTENT: Vec<Selector> = [
            ".detail__body-text",
            ".itp_bodycontent",
            ".read__content",
            ".detikRichTextArticle",
            ".detail-content",
            r#"[data-module="detikContent"]"#,
            "article .content",
            ".post-content",
            ".entry-content",
            ".article-content",
            ".content-body",
        ]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect();
        pub static ref PARAGRAPH: Selector = Selector::parse("p").unwrap();
        pub static ref BODY: Selector = Selector::parse("body").unwrap();

        // Subtrees whose text never counts as article content
        pub static ref CONTENT_NOISE: Selector = Selector::parse(
            "script, style, noscript, iframe, .advertisement, .ads, .social-share, .related-articles"
        )
        .unwrap();
        pub static ref CONTAINER_NOISE: Selector = Selector::parse(
            "script, style, noscript, iframe, .advertisement, .ads, .social-share, .related-articles, \
             .author-info, .tags, .share"
        )
        .unwrap();
        pub static ref BODY_NOISE: Selector = Selector::parse(
            "script, style, noscript, iframe, header, footer, nav, .sidebar, .menu, .navigation, \
             .advertisement, .ads"
        )
        .unwrap();
    }
}
