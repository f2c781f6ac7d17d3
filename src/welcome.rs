//! Greeting and quick topics shown when a chat session starts

use serde::Serialize;

/// First assistant turn of every session, and what "clear" resets to
pub const GREETING: &str = "Hello! I'm your CS Teaching Assistant. I'm here to help you with Data Structures & Algorithms, DBMS, Operating Systems, Computer Networks, Full Stack Web Development, Machine Learning and AI, Data Analysis, and programming in C++, Java, and Python. What would you like to learn today?";

/// A one-click starter question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickTopic {
    pub label: &'static str,
    pub query: &'static str,
}

pub const QUICK_TOPICS: &[QuickTopic] = &[
    QuickTopic {
        label: "Data Structures",
        query: "Explain binary trees with examples",
    },
    QuickTopic {
        label: "DBMS",
        query: "What is database normalization?",
    },
    QuickTopic {
        label: "Operating Systems",
        query: "Explain process scheduling algorithms",
    },
    QuickTopic {
        label: "Networks",
        query: "How does TCP/IP work?",
    },
    QuickTopic {
        label: "Full Stack Development",
        query: "Explain MERN stack",
    },
    QuickTopic {
        label: "Machine Learning",
        query: "What is supervised learning?",
    },
    QuickTopic {
        label: "Data Analysis",
        query: "Explain data visualization",
    },
    QuickTopic {
        label: "Algorithms",
        query: "Explain sorting algorithms",
    },
];
