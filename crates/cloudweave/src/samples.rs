//! Bundled sample proposal sets, captured from real generation responses.
//!
//! The sets are raw: diagram sources may carry mermaid fences and free-form
//! service names, and infrastructure code may carry terraform fences. Run
//! them through [`prepare_proposals`](crate::prepare_proposals) before
//! feeding them to the pipeline, exactly as a live generation response would
//! be.

use crate::DiagramProposal;

/// Three proposals for an employee check-in (attendance) system.
pub fn check_in_system() -> Vec<DiagramProposal> {
    vec![
        DiagramProposal {
            title: "Attendance System using Cloud Functions and Firestore".to_string(),
            description: "This architecture uses Cloud Functions, Firestore, and Cloud Scheduler \
                          to build a scalable and cost-effective attendance system. Cloud \
                          Functions executes backend logic such as user authentication, \
                          attendance recording, and report generation. Firestore stores \
                          attendance data, user data, and other system data. Cloud Scheduler \
                          schedules periodic tasks (such as report generation)."
                .to_string(),
            diagram_source: "graph LR\n    subgraph Google Cloud Platform\n        A[Cloud Functions] --> B(Firestore)\n        C[Cloud Scheduler] --> A\n        D[Identity Platform] --> A\n        E[Cloud Storage] --> A\n        F[BigQuery] --> A\n    end\n    subgraph Users\n        U[Users] --> D\n        U --> G[Web/Mobile App]\n        G --> A\n    end"
                .to_string(),
            infrastructure_code_source: r#"resource "google_cloudfunctions_function" "attendance_function" {
  name        = "attendance-function"
  description = "Cloud Function for attendance management"
  runtime     = "nodejs16"

  available_memory_mb   = 256
  source_archive_bucket = "your-bucket-name"
  source_archive_object = "function-source.zip"
  trigger_http          = true
}

resource "google_firestore_database" "default" {
  name     = "(default)"
  project  = "your-project-id"
  location = "us-central"
  type     = "firestore-native"
}

resource "google_cloudscheduler_job" "attendance_report" {
  name        = "attendance-report-job"
  description = "Generates daily attendance report"
  schedule    = "0 9 * * *"
  time_zone   = "America/Los_Angeles"
  project     = "your-project-id"

  http_target {
    http_method = "POST"
    uri         = "${google_cloudfunctions_function.attendance_function.https_trigger_url}"
  }
}"#
            .to_string(),
            estimated_cost: "Monthly cost: $150".to_string(),
        },
        DiagramProposal {
            title: "Attendance System using App Engine and Cloud SQL".to_string(),
            description: "This architecture uses App Engine, Cloud SQL, and Cloud Storage to \
                          build a more traditional attendance system. App Engine executes the \
                          frontend and backend logic. Cloud SQL stores attendance data, user \
                          data, and other system data. Cloud Storage stores reports and other \
                          files."
                .to_string(),
            diagram_source: "graph LR\n    subgraph Google Cloud Platform\n        A[App Engine] --> B(Cloud SQL)\n        A --> C(Cloud Storage)\n        D[Identity Platform] --> A\n        E[Cloud Logging] --> A\n    end\n    subgraph Users\n        U[Users] --> D\n        U --> F[Web/Mobile App]\n        F --> A\n    end"
                .to_string(),
            infrastructure_code_source: r#"resource "google_app_engine_application" "app" {
  project  = "your-project-id"
  location = "us-central"
}

resource "google_sql_database_instance" "default" {
  name             = "attendance-db"
  region           = "us-central1"
  database_version = "MYSQL_8_0"
  settings {
    tier = "db-f1-micro"
  }
  project             = "your-project-id"
  deletion_protection = false
}

resource "google_storage_bucket" "bucket" {
  name          = "your-unique-bucket-name"
  location      = "US"
  force_destroy = true
}"#
            .to_string(),
            estimated_cost: "Monthly cost: $250".to_string(),
        },
        DiagramProposal {
            title: "Attendance System using Compute Engine and Cloud Load Balancing".to_string(),
            description: "This architecture uses Compute Engine, Cloud Load Balancing, and Cloud \
                          SQL to build a more advanced attendance system. Compute Engine \
                          executes the frontend and backend logic. Cloud Load Balancing \
                          distributes traffic to Compute Engine instances. Cloud SQL stores \
                          attendance data, user data, and other system data."
                .to_string(),
            diagram_source: "graph LR\n    subgraph Google Cloud Platform\n        A[Compute Engine] --> B(Cloud SQL)\n        C[Cloud Load Balancing] --> A\n        D[Identity Platform] --> A\n        E[Cloud Monitoring] --> A\n    end\n    subgraph Users\n        U[Users] --> D\n        U --> F[Web/Mobile App]\n        F --> C\n    end"
                .to_string(),
            infrastructure_code_source: r#"resource "google_compute_network" "vpc_network" {
  name                    = "attendance-vpc"
  auto_create_subnetworks = false
  project                 = "your-project-id"
}

resource "google_compute_firewall" "firewall" {
  name    = "attendance-firewall"
  network = google_compute_network.vpc_network.name
  allow {
    protocol = "tcp"
    ports    = ["80", "443", "22"]
  }
  project = "your-project-id"
}

resource "google_compute_instance" "default" {
  name         = "attendance-vm"
  machine_type = "e2-medium"
  zone         = "us-central1-a"
  project      = "your-project-id"
  boot_disk {
    initialize_params {
      image = "debian-cloud/debian-11"
    }
  }
  network_interface {
    network = google_compute_network.vpc_network.name
    access_config {
    }
  }
}"#
            .to_string(),
            estimated_cost: "Monthly cost: $400".to_string(),
        },
    ]
}

/// Three proposals for a mobile game backend. Unlike [`check_in_system`],
/// these carry mermaid and terraform fences, like a typical fresh response.
pub fn game_backend() -> Vec<DiagramProposal> {
    vec![
        DiagramProposal {
            title: "Mobile Game Server using Cloud Run and Cloud SQL".to_string(),
            description: "This architecture uses Cloud Run to host a game server and Cloud SQL \
                          to store game data. Cloud Monitoring and Cloud Logging are used for \
                          monitoring and logging the server. Cloud Load Balancing distributes \
                          traffic to multiple Cloud Run instances."
                .to_string(),
            diagram_source: "```mermaid\ngraph LR\n    A[User] --> B(Cloud Load Balancing)\n    B --> C{Cloud Run}\n    C --> D[(Cloud SQL)]\n    E[Cloud Monitoring] -- Monitoring --> C\n    F[Cloud Logging] -- Logging --> C\n```"
                .to_string(),
            infrastructure_code_source: "```terraform\n".to_string()
                + r#"resource "google_cloud_run_v2_service" "default" {
  name     = "game-server"
  location = "us-central1"

  template {
    containers {
      image = "us-docker.pkg.dev/cloudrun/container/hello"
    }
  }

  traffic {
    type    = "TRAFFIC_TARGET_ALLOCATION_TYPE_LATEST"
    percent = 100
  }
}

resource "google_sql_database_instance" "default" {
  name             = "game-db"
  region           = "us-central1"
  database_version = "MYSQL_8_0"
  settings {
    tier = "db-f1-micro"
  }
}"#
                + "\n```",
            estimated_cost: "Monthly cost: $500".to_string(),
        },
        DiagramProposal {
            title: "Compute Engine and Firestore for mobile game server".to_string(),
            description: "This architecture uses Compute Engine to host a game server and \
                          Firestore to store game data. Cloud Monitoring and Cloud Logging are \
                          used for monitoring and logging the server. The Global Load Balancer \
                          distributes traffic to multiple Compute Engine instances."
                .to_string(),
            diagram_source: "```mermaid\ngraph LR\n    A[User] --> B(Global Load Balancer)\n    B --> C((Compute Engine))\n    C --> D[Firestore]\n    E[Cloud Monitoring] -- Monitoring --> C\n    F[Cloud Logging] -- Logging --> C\n```"
                .to_string(),
            infrastructure_code_source: "```terraform\n".to_string()
                + r#"resource "google_compute_instance" "default" {
  name         = "game-server-vm"
  machine_type = "e2-medium"
  zone         = "us-central1-a"

  boot_disk {
    initialize_params {
      image = "debian-cloud/debian-11"
    }
  }

  network_interface {
    network = "default"
    access_config {
    }
  }
}

resource "google_firestore_database" "default" {
  name     = "default"
  location = "us-central1"
  type     = "FIRESTORE_NATIVE"
}"#
                + "\n```",
            estimated_cost: "Monthly cost: $700".to_string(),
        },
        DiagramProposal {
            title: "Mobile Game Server using GKE and Cloud Spanner".to_string(),
            description: "This architecture uses Google Kubernetes Engine (GKE) to host a game \
                          server and Cloud Spanner to store game data. Cloud Monitoring and \
                          Cloud Logging are used for monitoring and logging the server. Cloud \
                          Load Balancing distributes traffic to multiple GKE pods."
                .to_string(),
            diagram_source: "```mermaid\ngraph LR\n    A[User] --> B(Cloud Load Balancing)\n    B --> C{{GKE}}\n    C --> D((Cloud Spanner))\n    E[Cloud Monitoring] -- Monitoring --> C\n    F[Cloud Logging] -- Logging --> C\n```"
                .to_string(),
            infrastructure_code_source: "```terraform\n".to_string()
                + r#"resource "google_container_cluster" "default" {
  name               = "game-cluster"
  location           = "us-central1"
  initial_node_count = 1

  node_config {
    machine_type = "e2-medium"
  }
}

resource "google_spanner_instance" "default" {
  name         = "game-spanner"
  config       = "regional-us-central1"
  display_name = "Game Spanner Instance"
  num_nodes    = 1
}"#
                + "\n```",
            estimated_cost: "Monthly cost: $1000".to_string(),
        },
    ]
}
