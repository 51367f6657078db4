//! Embedded substitute data served when every live source fails or is empty.
//!
//! Both datasets are non-empty; the loader relies on that to guarantee a
//! usable result.

use crate::models::{ArticleItem, Language, ProjectItem, RemoteItem, ResourceKind};

/// Id prefix for fallback items that lack an id.
pub const FALLBACK_ID_PREFIX: &str = "fallback";

pub fn dataset(kind: ResourceKind) -> Vec<RemoteItem> {
    match kind {
        ResourceKind::Projects => projects().into_iter().map(RemoteItem::Project).collect(),
        ResourceKind::Articles => articles().into_iter().map(RemoteItem::Article).collect(),
    }
}

fn lang(name: &str, color_hex: &str) -> Language {
    Language {
        name: name.to_string(),
        color_hex: color_hex.to_string(),
    }
}

fn projects() -> Vec<ProjectItem> {
    vec![
        ProjectItem {
            id: "1".to_string(),
            name: "Banking System".to_string(),
            description: "A Java-based banking system with secure transaction processing and account management features.".to_string(),
            url: "https://github.com/luanferreiradev/banco-malvader".to_string(),
            homepage_url: None,
            languages: vec![lang("Java", "#b07219"), lang("MySQL", "#e38c00")],
            star_count: 5,
            fork_count: 2,
        },
        ProjectItem {
            id: "2".to_string(),
            name: "Order Management System".to_string(),
            description: "Web application for managing customer orders, inventory, and sales reports.".to_string(),
            url: "https://github.com/luanferreiradev/sistema-pedidos".to_string(),
            homepage_url: None,
            languages: vec![
                lang("Java", "#b07219"),
                lang("Spring", "#6db33f"),
                lang("Angular", "#dd0031"),
            ],
            star_count: 3,
            fork_count: 1,
        },
        ProjectItem {
            id: "3".to_string(),
            name: "Chess Game".to_string(),
            description: "Implementation of a chess game with AI opponent and multiplayer capabilities.".to_string(),
            url: "https://github.com/luanferreiradev/chess".to_string(),
            homepage_url: None,
            languages: vec![lang("Java", "#b07219"), lang("JavaFX", "#5382a1")],
            star_count: 7,
            fork_count: 3,
        },
        ProjectItem {
            id: "4".to_string(),
            name: "Portfolio Website".to_string(),
            description: "My personal portfolio website built with Next.js and Tailwind CSS.".to_string(),
            url: "https://github.com/luanferreiradev/portfolio".to_string(),
            homepage_url: Some("https://luanferreira.dev".to_string()),
            languages: vec![
                lang("TypeScript", "#3178c6"),
                lang("Next.js", "#000000"),
                lang("Tailwind", "#38b2ac"),
            ],
            star_count: 4,
            fork_count: 1,
        },
    ]
}

fn article(
    id: &str,
    title: &str,
    slug: &str,
    published_at: &str,
    body: &str,
    categories: &[&str],
) -> ArticleItem {
    ArticleItem {
        id: id.to_string(),
        title: title.to_string(),
        link: format!("https://medium.com/@lhferreirad/{slug}"),
        published_at: published_at.to_string(),
        body_html: body.to_string(),
        thumbnail_url: None,
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

fn articles() -> Vec<ArticleItem> {
    vec![
        article(
            "1",
            "Criando APIs RESTful com Spring Boot",
            "criando-apis-restful-com-spring-boot",
            "2023-10-15",
            "Aprenda a criar APIs RESTful robustas e escaláveis com Spring Boot...",
            &["Java", "Spring Boot", "API"],
        ),
        article(
            "2",
            "Microsserviços com Kotlin e AWS",
            "microsservicos-com-kotlin-e-aws",
            "2023-11-20",
            "Explorando arquiteturas de microsserviços com Kotlin e serviços AWS...",
            &["Kotlin", "AWS", "Microservices"],
        ),
        article(
            "3",
            "Testes automatizados para aplicações Java",
            "testes-automatizados-para-aplicacoes-java",
            "2024-01-10",
            "Melhores práticas para implementar testes automatizados em aplicações Java...",
            &["Java", "Testing", "JUnit"],
        ),
        article(
            "4",
            "Angular: Melhores práticas de arquitetura",
            "angular-melhores-praticas-de-arquitetura",
            "2024-02-05",
            "Organizando seu projeto Angular com padrões de arquitetura escaláveis...",
            &["Angular", "TypeScript", "Frontend"],
        ),
    ]
}
