//! Static landing page copy

pub struct SubService {
    pub name: &'static str,
    pub detail: &'static str,
}

pub struct ServiceCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub sub_services: &'static [SubService],
}

pub struct ShowcaseCard {
    pub title: &'static str,
    pub detail: &'static str,
}

pub struct ProcessStep {
    pub num: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
}

pub const HERO_TITLE: &str = "Custom low-code software solutions";
pub const HERO_TAGLINE: &[&str] = &[
    "Delivering enterprise-grade solutions at startup speed.",
    "Built with quality that empowers your tomorrow.",
];
pub const HERO_CALL_TO_ACTION: &str = "Start your project: press c to talk to our assistant";

pub const SERVICES: &[ServiceCategory] = &[
    ServiceCategory {
        id: "01",
        title: "Custom Software Engineering",
        description: "End-to-end development of scalable, high-performance applications \
                      tailored to your business logic.",
        sub_services: &[
            SubService {
                name: "Enterprise Web Apps",
                detail: "React, Next.js, and Node.js solutions built for scale.",
            },
            SubService {
                name: "Mobile Development",
                detail: "Native-feel iOS and Android apps using React Native.",
            },
            SubService {
                name: "Legacy Modernization",
                detail: "Transforming outdated systems into modern cloud-native architectures.",
            },
            SubService {
                name: "UI/UX Design Systems",
                detail: "Consistent, accessible, and beautiful interfaces that drive engagement.",
            },
        ],
    },
    ServiceCategory {
        id: "02",
        title: "AI & Data Intelligence",
        description: "Leverage the power of Generative AI and predictive analytics to automate \
                      and optimize.",
        sub_services: &[
            SubService {
                name: "LLM Integration",
                detail: "Custom implementation of Gemini and OpenAI models into your workflow.",
            },
            SubService {
                name: "Predictive Analytics",
                detail: "Forecasting trends using your historical business data.",
            },
            SubService {
                name: "Intelligent Chatbots",
                detail: "24/7 customer support agents with natural language understanding.",
            },
            SubService {
                name: "Data Pipelines",
                detail: "Robust ETL processes to centralize and clean your organization's data.",
            },
        ],
    },
    ServiceCategory {
        id: "03",
        title: "Cloud Infrastructure",
        description: "Secure, scalable, and cost-effective cloud foundations for your digital \
                      products.",
        sub_services: &[
            SubService {
                name: "Cloud Migration",
                detail: "Seamless transition of on-premise assets to AWS, Azure, or GCP.",
            },
            SubService {
                name: "DevOps Automation",
                detail: "CI/CD pipelines to speed up deployment and reduce errors.",
            },
            SubService {
                name: "Serverless Architecture",
                detail: "Cost-efficient backends that scale automatically with traffic.",
            },
            SubService {
                name: "Security Audits",
                detail: "Comprehensive vulnerability assessments and compliance checks.",
            },
        ],
    },
];

pub const SHOWCASE_EYEBROW: &str = "SaaS Product Studio";
pub const SHOWCASE_TITLE: &str = "We build software that sells.";
pub const SHOWCASE_BODY: &str = "From complex dashboards to high-performance mobile apps, we \
                                 design and develop the entire ecosystem of your SaaS product.";

pub const SHOWCASE_CARDS: &[ShowcaseCard] = &[
    ShowcaseCard {
        title: "Analytics Dashboards",
        detail: "Real-time data visualization with responsive interactive charts.",
    },
    ShowcaseCard {
        title: "Mobile First",
        detail: "Native-grade performance on all devices.",
    },
    ShowcaseCard {
        title: "Secure API",
        detail: "Scalable backend infrastructure.",
    },
    ShowcaseCard {
        title: "Automated Workflows",
        detail: "Trigger complex actions instantly.",
    },
    ShowcaseCard {
        title: "Real-time Collaboration",
        detail: "Multiplayer editing and live sync built-in. Connect your team instantly.",
    },
];

pub const AI_WORKFLOW_EYEBROW: &str = "Live Integration";
pub const AI_WORKFLOW_TITLE: &[&str] = &["Intelligent Agents,", "Not just Chatbots."];
pub const AI_WORKFLOW_BODY: &str = "We build custom AI agents that connect directly to your \
                                    database, process documents, and execute actions. Move beyond \
                                    simple Q&A to real autonomous workflows.";
pub const AI_WORKFLOW_FEATURES: &[&str] = &[
    "Context-aware memory",
    "RAG (Retrieval-Augmented Generation)",
    "Multi-modal inputs (Text, Image, Audio)",
];
pub const AI_WORKFLOW_NODES: &[&str] =
    &["User", "Database", "API", "JSON", "Action", "Doc Proc", "Knowledge"];

pub const PROCESS: &[ProcessStep] = &[
    ProcessStep {
        num: "01",
        title: "Discovery",
        desc: "We dive deep into your business logic to understand the core problem.",
    },
    ProcessStep {
        num: "02",
        title: "Architecture",
        desc: "Designing a scalable blueprint leveraging the best low-code tools.",
    },
    ProcessStep {
        num: "03",
        title: "Development",
        desc: "Rapid sprints with constant feedback loops to ensure alignment.",
    },
    ProcessStep {
        num: "04",
        title: "Launch",
        desc: "Seamless deployment and handover with comprehensive documentation.",
    },
];

pub const CONTACT_HEADING: &str = "Get in Touch";
pub const CONTACT_BODY: &str = "Have a project in mind? Ask the assistant anything about how we \
                                work, or tell it what you want to build and we will follow up.";
