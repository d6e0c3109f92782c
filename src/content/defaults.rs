//! Hard-coded baseline for every editable piece of the public site.
//!
//! The defaults table is the floor the merge resolver builds on: a missing
//! or unreachable stored configuration must never blank out the site.
//! Section keys are `page.section` (`home.hero`, `consultancy.pricing`).

use std::collections::BTreeMap;

use crate::models::{
    ContentConfig, CreateServiceRequest, SectionConfig, SiteConfig, ThemeConfig, TypographyConfig,
};

/// Key of a section inside `content.sections`.
pub fn section_key(page: &str, section: &str) -> String {
    format!("{}.{}", page, section)
}

fn section(
    title: &str,
    subtitle: &str,
    button: Option<(&str, &str)>,
) -> SectionConfig {
    SectionConfig {
        is_active: Some(true),
        title: Some(title.to_string()),
        subtitle: Some(subtitle.to_string()),
        button_text: button.map(|(text, _)| text.to_string()),
        button_redirect: button.map(|(_, redirect)| redirect.to_string()),
        ..SectionConfig::default()
    }
}

/// The complete baseline configuration.
pub fn default_site_config() -> SiteConfig {
    let mut sections: BTreeMap<String, SectionConfig> = BTreeMap::new();

    // Landing page
    sections.insert(
        section_key("home", "hero"),
        section(
            "Transformamos Cliques em Clientes Reais",
            "Estratégias de marketing digital orientadas a dados para escalar o seu negócio",
            Some(("Quero vender mais", "#contact")),
        ),
    );
    sections.insert(
        section_key("home", "services"),
        section(
            "Nossos Serviços",
            "Soluções completas para cada etapa do seu funil",
            None,
        ),
    );
    sections.insert(
        section_key("home", "swot"),
        section(
            "Diagnóstico SWOT Gratuito",
            "Descubra as forças e fraquezas do seu marketing em 5 minutos",
            Some(("Fazer diagnóstico", "#swot")),
        ),
    );
    sections.insert(
        section_key("home", "pricing"),
        section(
            "Planos e Preços",
            "Escolha o plano que acompanha o momento da sua empresa",
            None,
        ),
    );
    sections.insert(
        section_key("home", "blog"),
        section(
            "Blog",
            "Conteúdo prático sobre marketing, tráfego e vendas",
            Some(("Ver todos os artigos", "#blog")),
        ),
    );
    sections.insert(
        section_key("home", "contact"),
        section(
            "Fale com a gente",
            "Conte o seu desafio e receba uma proposta em até 24 horas",
            Some(("Enviar mensagem", "#contact")),
        ),
    );
    sections.insert(section_key("home", "footer"), {
        let mut footer = section(
            "Converta Marketing",
            "Marketing de performance para empresas que querem crescer",
            None,
        );
        footer.show_social_icons = Some(true);
        footer
    });

    // Service pages
    sections.insert(
        section_key("consultancy", "hero"),
        section(
            "Consultoria de Marketing",
            "Um plano de crescimento desenhado para a sua operação",
            Some(("Agendar conversa", "#contact")),
        ),
    );
    sections.insert(
        section_key("consultancy", "pricing"),
        section(
            "Pacotes de Consultoria",
            "Acompanhamento próximo, do diagnóstico à execução",
            None,
        ),
    );
    sections.insert(
        section_key("ads", "hero"),
        section(
            "Gestão de Tráfego Pago",
            "Campanhas que transformam investimento em receita",
            Some(("Quero anunciar", "#contact")),
        ),
    );
    sections.insert(
        section_key("ads", "pricing"),
        section(
            "Planos de Tráfego",
            "Google, Meta e LinkedIn sob gestão de especialistas",
            None,
        ),
    );
    sections.insert(
        section_key("sales", "hero"),
        section(
            "Aceleração de Vendas",
            "Processos comerciais que fecham o que o marketing gera",
            Some(("Acelerar minhas vendas", "#contact")),
        ),
    );
    sections.insert(
        section_key("sales", "pricing"),
        section(
            "Programas de Vendas",
            "Treinamento, playbooks e CRM funcionando juntos",
            None,
        ),
    );

    // Blog page
    sections.insert(section_key("blog", "header"), {
        let mut header = section(
            "Blog da Converta",
            "Ideias e táticas testadas em campo",
            None,
        );
        header.show_share_menu = Some(true);
        header
    });

    SiteConfig {
        name: "Converta Marketing".to_string(),
        phone: "+55 11 4002-8922".to_string(),
        email: "contato@converta.marketing".to_string(),
        instagram_url: "https://instagram.com/converta.marketing".to_string(),
        whatsapp_number: "+5511940028922".to_string(),
        theme: ThemeConfig {
            primary_color: "#6D28D9".to_string(),
            secondary_color: "#F59E0B".to_string(),
            border_radius: "12px".to_string(),
            typography: TypographyConfig {
                font_family: "Inter".to_string(),
                heading_font: "Poppins".to_string(),
            },
        },
        is_blog_active: true,
        is_swot_active: true,
        content: ContentConfig { sections },
    }
}

fn card(
    name: &str,
    subtitle: &str,
    price: &str,
    category: &str,
    page: &str,
    section_id: &str,
    features: &[&str],
    display_order: i64,
    highlighted: bool,
) -> CreateServiceRequest {
    CreateServiceRequest {
        name: name.to_string(),
        subtitle: Some(subtitle.to_string()),
        description: None,
        price: Some(price.to_string()),
        category: Some(category.to_string()),
        page: Some(page.to_string()),
        section_id: Some(section_id.to_string()),
        features: features.iter().map(|f| f.to_string()).collect(),
        display_order,
        is_active: true,
        is_highlighted: highlighted,
        badge_text: highlighted.then(|| "Mais contratado".to_string()),
        extra_info: None,
    }
}

/// The baseline service cards inserted by the sync-defaults operation.
pub fn default_service_cards() -> Vec<CreateServiceRequest> {
    vec![
        card(
            "Start",
            "Para quem está começando a anunciar",
            "R$ 1.500/mês",
            "marketing",
            "home",
            "pricing",
            &[
                "Gestão de 1 canal de mídia",
                "Relatório mensal de resultados",
                "Suporte por e-mail",
            ],
            1,
            false,
        ),
        card(
            "Growth",
            "Para empresas em ritmo de expansão",
            "R$ 3.200/mês",
            "marketing",
            "home",
            "pricing",
            &[
                "Gestão de até 3 canais de mídia",
                "Landing pages de conversão",
                "Reunião quinzenal de estratégia",
                "Relatório semanal de resultados",
            ],
            2,
            true,
        ),
        card(
            "Performance",
            "Para operações que exigem escala",
            "Sob consulta",
            "marketing",
            "home",
            "pricing",
            &[
                "Canais ilimitados",
                "Squad dedicado",
                "CRO e testes A/B contínuos",
                "Dashboards em tempo real",
            ],
            3,
            false,
        ),
        card(
            "Diagnóstico Express",
            "Leitura completa do seu funil em uma semana",
            "R$ 2.400",
            "consultoria",
            "consultancy",
            "pricing",
            &[
                "Auditoria de canais e concorrência",
                "Matriz SWOT comentada",
                "Plano de ação priorizado",
            ],
            1,
            false,
        ),
        card(
            "Consultoria Mensal",
            "Um estrategista sênior ao lado do seu time",
            "R$ 4.800/mês",
            "consultoria",
            "consultancy",
            "pricing",
            &[
                "2 reuniões de estratégia por mês",
                "Revisão de campanhas e criativos",
                "Acesso direto via WhatsApp",
            ],
            2,
            true,
        ),
        card(
            "Tráfego Essencial",
            "Google e Meta Ads sob gestão profissional",
            "R$ 1.900/mês",
            "marketing",
            "ads",
            "pricing",
            &[
                "Setup de contas e pixels",
                "Otimização semanal",
                "Relatório mensal",
            ],
            1,
            false,
        ),
        card(
            "Tráfego Full-Funnel",
            "Da atração à recompra, tudo sob gestão",
            "R$ 3.900/mês",
            "marketing",
            "ads",
            "pricing",
            &[
                "Campanhas de topo, meio e fundo",
                "Remarketing dinâmico",
                "Criativos inclusos",
                "Reunião quinzenal",
            ],
            2,
            true,
        ),
        card(
            "Sales Sprint",
            "6 semanas para estruturar o seu comercial",
            "R$ 7.500",
            "vendas",
            "sales",
            "pricing",
            &[
                "Playbook de vendas",
                "Implantação de CRM",
                "Treinamento do time",
            ],
            1,
            false,
        ),
    ]
}
