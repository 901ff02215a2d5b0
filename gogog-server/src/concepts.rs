//! Static reference entries for Go concepts.

use serde::Serialize;

/// One named explanation/example pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Concept {
    #[serde(skip)]
    pub name: &'static str,
    pub description: &'static str,
    pub example: &'static str,
}

pub const CONCEPT_NOT_FOUND: &str = "Concept not found";

const CONCEPTS: &[Concept] = &[
    Concept {
        name: "variables",
        description: "Variables in Go are explicitly declared and used by the compiler to check type-correctness of function calls.",
        example: "var x int = 10",
    },
    Concept {
        name: "functions",
        description: "Functions in Go are declared using the func keyword and can have multiple return values.",
        example: "func add(a int, b int) int {\n    return a + b\n}",
    },
    Concept {
        name: "loops",
        description: "Go has a single looping construct, the for loop, which covers counted, conditional and infinite loops.",
        example: "for i := 0; i < 3; i++ {\n    fmt.Println(i)\n}",
    },
    Concept {
        name: "slices",
        description: "Slices are dynamically-sized views into arrays and grow with the built-in append function.",
        example: "nums := []int{1, 2, 3}\nnums = append(nums, 4)",
    },
    Concept {
        name: "maps",
        description: "Maps associate keys with values; looking up a missing key yields the value type's zero value.",
        example: "ages := map[string]int{\"alice\": 30}\nage, ok := ages[\"bob\"]",
    },
    Concept {
        name: "structs",
        description: "Structs group typed fields into a single value and can carry methods.",
        example: "type Point struct {\n    X, Y int\n}",
    },
    Concept {
        name: "interfaces",
        description: "Interfaces name a set of methods; any type with those methods satisfies the interface implicitly.",
        example: "type Shape interface {\n    Area() float64\n}",
    },
    Concept {
        name: "errors",
        description: "Errors are ordinary values returned alongside results and checked explicitly by the caller.",
        example: "f, err := os.Open(\"data.txt\")\nif err != nil {\n    return err\n}",
    },
    Concept {
        name: "goroutines",
        description: "A goroutine is a lightweight thread managed by the Go runtime, started with the go keyword.",
        example: "go worker(jobs)",
    },
    Concept {
        name: "channels",
        description: "Channels are typed conduits that goroutines use to send and receive values.",
        example: "ch := make(chan int)\ngo func() { ch <- 42 }()\nv := <-ch",
    },
];

/// Find a concept by name, ignoring ASCII case.
pub fn lookup(name: &str) -> Option<&'static Concept> {
    CONCEPTS
        .iter()
        .find(|concept| concept.name.eq_ignore_ascii_case(name))
}

pub fn names() -> impl Iterator<Item = &'static str> {
    CONCEPTS.iter().map(|concept| concept.name)
}
