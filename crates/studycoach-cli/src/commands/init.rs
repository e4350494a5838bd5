//! The `studycoach init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create studycoach.toml
    if std::path::Path::new("studycoach.toml").exists() {
        println!("studycoach.toml already exists, skipping.");
    } else {
        std::fs::write("studycoach.toml", SAMPLE_CONFIG)?;
        println!("Created studycoach.toml");
    }

    // Create example content pack
    if std::path::Path::new("content_pack.json").exists() {
        println!("content_pack.json already exists, skipping.");
    } else {
        std::fs::write("content_pack.json", EXAMPLE_CONTENT_PACK)?;
        println!("Created content_pack.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit content_pack.json with your own questions");
    println!("  2. Run: studycoach validate --content-pack content_pack.json");
    println!("  3. Run: studycoach run");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studycoach configuration

content_pack = "content_pack.json"
recent_events = 10

[classifier]
type = "rules"
"#;

const EXAMPLE_CONTENT_PACK: &str = r#"{
  "topic": "Big-O Basics",
  "diagnostic": [
    {
      "id": "Q1",
      "question": "In your own words, what does O(n) say about an algorithm?"
    },
    {
      "id": "Q2",
      "question": "If every value stored in a list doubles, does a full scan get slower in Big-O terms?"
    },
    {
      "id": "Q3",
      "question": "How many times can you halve n before reaching 1, and what complexity does that suggest?"
    }
  ],
  "misconceptions": [
    {
      "id": "M1",
      "name": "Focus on values, not input size",
      "description": "Measures complexity against the stored values instead of the input size n."
    },
    {
      "id": "M2",
      "name": "Constant factors are significant",
      "description": "Treats 2n as meaningfully worse than n in Big-O terms."
    },
    {
      "id": "M3",
      "name": "Halving means linear",
      "description": "Thinks repeated halving takes about n steps to finish."
    },
    {
      "id": "M4",
      "name": "Best/average vs worst case",
      "description": "Reports the lucky or typical case where Big-O asks for the worst case."
    }
  ],
  "help": {
    "CORRECT": {
      "explanation": "Your answer shows a solid grasp of the concept.",
      "hints": ["Try the practice questions to consolidate it."]
    },
    "NEEDS_MORE_INPUT": {
      "explanation": "There wasn't enough in your answer to analyze.",
      "hints": ["Describe what the algorithm does step by step."]
    },
    "M1": {
      "explanation": "Complexity is measured against the input size n, not against the particular values stored in the input.",
      "hints": [
        "Ask: how does the work grow when the list gets longer?",
        "Doubling every value doesn't change how many elements a scan visits."
      ]
    },
    "M2": {
      "explanation": "Big-O ignores constant factors: 2n steps and n steps are both O(n).",
      "hints": ["Only the growth rate matters as n gets large."]
    },
    "M3": {
      "explanation": "Repeatedly halving the input reaches 1 after about log2(n) steps, not after n steps.",
      "hints": ["Count the halvings for n = 16: 16, 8, 4, 2, 1."]
    },
    "M4": {
      "explanation": "Unless stated otherwise, Big-O describes the worst case.",
      "hints": ["Ask what input would make the algorithm do the most work."]
    }
  },
  "practice": {
    "M1": [
      {
        "id": "m1-scan",
        "prompt": "A loop visits each of the n elements once. What is its complexity?",
        "expected_answer": "O(n)"
      },
      {
        "id": "m1-values",
        "prompt": "You double every number in a list of n elements. What is the complexity of one full pass?",
        "expected_answer": "O(n)"
      }
    ],
    "M2": [
      {
        "id": "m2-two-passes",
        "prompt": "An algorithm makes two full passes over n elements (2n steps). What is its Big-O complexity?",
        "expected_answer": "O(n)"
      }
    ],
    "M3": [
      {
        "id": "m3-binary-search",
        "prompt": "Binary search halves the remaining range each step. What is its complexity?",
        "expected_answer": "O(log n)"
      }
    ],
    "M4": [
      {
        "id": "m4-worst-case",
        "prompt": "Linear search finds the target immediately on a lucky input. What complexity does Big-O report for it?",
        "expected_answer": "O(n)"
      }
    ]
  }
}
"#;
